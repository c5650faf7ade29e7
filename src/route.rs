/// The fixed set of views reachable by path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    About,
    Events,
    Team,
    Contact,
}

impl Route {
    pub const ALL: [Route; 5] = [
        Route::Home,
        Route::About,
        Route::Events,
        Route::Team,
        Route::Contact,
    ];

    /// Resolves a requested path. `/` and anything unmatched redirect to home.
    pub fn resolve(path: &str) -> Route {
        let trimmed = path.trim();
        let trimmed = trimmed.split(['?', '#']).next().unwrap_or("");
        let segment = trimmed.trim_matches('/');
        Route::ALL
            .into_iter()
            .find(|route| route.segment().eq_ignore_ascii_case(segment))
            .unwrap_or(Route::Home)
    }

    pub fn segment(self) -> &'static str {
        match self {
            Route::Home => "home",
            Route::About => "about",
            Route::Events => "events",
            Route::Team => "team",
            Route::Contact => "contact",
        }
    }

    pub fn path(self) -> String {
        format!("/{}", self.segment())
    }

    /// Capitalized route segment, e.g. `Events`.
    pub fn page_name(self) -> String {
        let segment = self.segment();
        let mut chars = segment.chars();
        match chars.next() {
            Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
            None => String::new(),
        }
    }

    pub fn page_title(self, site_name: &str) -> String {
        format!("{} | {}", self.page_name(), site_name)
    }

    /// The landing view renders without the header chrome.
    pub fn shows_header(self) -> bool {
        self != Route::Home
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_and_unknown_paths_redirect_home() {
        assert_eq!(Route::resolve("/"), Route::Home);
        assert_eq!(Route::resolve(""), Route::Home);
        assert_eq!(Route::resolve("/unknown-path"), Route::Home);
        assert_eq!(Route::resolve("/team/extra"), Route::Home);
    }

    #[test]
    fn known_paths_ignore_case_and_trailing_slash() {
        assert_eq!(Route::resolve("/about"), Route::About);
        assert_eq!(Route::resolve("/About/"), Route::About);
        assert_eq!(Route::resolve("/events?x=1"), Route::Events);
        assert_eq!(Route::resolve("contact"), Route::Contact);
    }

    #[test]
    fn titles_capitalize_the_segment() {
        assert_eq!(Route::Team.page_title("MathSoc IITD"), "Team | MathSoc IITD");
        assert_eq!(Route::Home.page_name(), "Home");
    }

    #[test]
    fn header_hidden_only_on_home() {
        for route in Route::ALL {
            assert_eq!(route.shows_header(), route != Route::Home);
        }
    }
}
