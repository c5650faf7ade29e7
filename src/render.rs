use maud::{DOCTYPE, Markup, PreEscaped, html};

use crate::builtin;
use crate::config::SiteConfig;
use crate::contact::ContactState;
use crate::document::CHROME_META_NAMES;
use crate::events::{self, Badge, Side};
use crate::feed::{self, FeedState};
use crate::route::Route;
use crate::shell::{HomePage, NavigationState, PageState, View};
use crate::team::{self, Social, TeamMember};

#[derive(Debug, Clone, Copy)]
pub enum Stylesheet<'a> {
    Link(&'a str),
    Inline(&'a str),
}

pub fn render_page(view: &View<'_>, stylesheet: Stylesheet<'_>) -> String {
    let document = view.document;
    let route = view.nav.route;

    let markup: Markup = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                @for name in CHROME_META_NAMES {
                    meta name=(name) content=(document.meta(name).unwrap_or("#fff"));
                }
                title { (document.title) }
                @match stylesheet {
                    Stylesheet::Link(href) => {
                        link rel="stylesheet" href=(href);
                    }
                    Stylesheet::Inline(css) => {
                        style { (PreEscaped(css)) }
                    }
                }
            }
            body class=(document.class_attr()) data-route=(route.segment()) {
                @if view.nav.loading {
                    div class="loader" {}
                }
                @if view.nav.offline_banner {
                    (offline_banner())
                }
                @if route.shows_header() {
                    (header(view.config, view.nav))
                }
                main {
                    @match view.page {
                        PageState::Home(home) => { (home_page(view, home)) }
                        PageState::Contact(contact) => { (contact_page(view.config, &contact.state)) }
                        PageState::Static => { (static_page(view.config, route)) }
                    }
                }
                footer {
                    div {
                        span id="mode-toggler" { (view.theme.toggle_label()) }
                    }
                    div class="copy" { "Copyright \u{a9} " (view.config.org_name) ", " (view.config.org_unit) }
                }
                script { (PreEscaped(builtin::THEME_TOGGLE_JS)) }
                @if matches!(view.page, PageState::Home(_)) {
                    script { (PreEscaped(builtin::COUNTDOWN_JS)) }
                }
            }
        }
    };
    markup.into_string()
}

fn offline_banner() -> Markup {
    html! {
        div class="alert-offline" role="alert" {
            div { strong { "You are Offline!" } }
            div { "No network available. Check your internet connection and try again!" }
            button type="button" class="close" aria-label="Close" {
                span aria-hidden="true" { "\u{d7}" }
            }
        }
    }
}

fn header(config: &SiteConfig, nav: &NavigationState) -> Markup {
    let wrap_class = if nav.scrolled {
        "navigation-wrap start-header scroll-on"
    } else {
        "navigation-wrap start-header"
    };
    let collapse_class = if nav.menu_open {
        "collapse navbar-collapse show"
    } else {
        "collapse navbar-collapse"
    };

    html! {
        header class="site-header" {
            div class=(wrap_class) {
                div class="container" {
                    nav class="navbar" {
                        a class="navbar-brand" href=(Route::Home.path()) {
                            (config.org_name)
                        }
                        button type="button" class="navbar-toggler"
                            aria-controls="navbarSupportedContent"
                            aria-expanded=(if nav.menu_open { "true" } else { "false" })
                            aria-label="Toggle navigation" {
                            span class="navbar-toggler-icon" {}
                        }
                        div class=(collapse_class) id="navbarSupportedContent" {
                            ul class="navbar-nav" {
                                @for route in Route::ALL {
                                    li class=(if route == nav.route { "nav-item active" } else { "nav-item" })
                                        id=(format!("nav-{}", route.segment())) {
                                        a class="nav-link" href=(route.path()) { (route.page_name()) }
                                    }
                                }
                                li class="nav-item" {
                                    a class="nav-link" href=(config.blog_url.as_str()) target="_blank" rel="noopener noreferrer" {
                                        "Blog"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn home_page(view: &View<'_>, home: &HomePage) -> Markup {
    let config = view.config;
    html! {
        div class="section" id="home" {
            div class="container" {
                h1 { (config.org_name) }
                h2 { (config.org_unit) }

                div class="home-links" {
                    @for route in [Route::About, Route::Events, Route::Team, Route::Contact] {
                        a class="btn-1 block center" href=(route.path()) { (route.page_name()) }
                    }
                }

                @if let Some(countdown) = &home.countdown {
                    div class="color-box l-font" {
                        span class="is-upcoming" {
                            span id="countdown" data-target=(countdown.target().to_rfc3339()) {
                                (countdown.state().display())
                            }
                        }
                    }
                }

                @if home.feed.is_loading() || !home.feed.items().is_empty() {
                    (feed_section(config, &home.feed))
                }

                div class="theme-switch" {
                    span class="for-light-text" { "Switch back to light mode?" }
                    label class="switch" id="mode-toggler-switch" {
                        input type="checkbox" checked[view.theme.is_dark()];
                        span class="slider" {}
                    }
                    span class="for-dark-text" { "Try out the dark mode now!" }
                }
            }
        }
    }
}

fn feed_section(config: &SiteConfig, state: &FeedState) -> Markup {
    html! {
        div id="feed" class="container" {
            div class="feed-head" {
                h3 { "Latest Posts" }
                a href=(config.blog_url.as_str()) target="_blank" rel="noopener noreferrer" { "Show all" }
            }
            div id="feed-items" {
                @match state {
                    FeedState::Loading => {
                        p class="feed-loading" { "Loading latest posts..." }
                    }
                    FeedState::Ready { items, .. } => {
                        @for item in items {
                            article class="feed-item" {
                                h4 class="feed-title" { (item.title) }
                                p class="feed-summ" { (item.summary) }
                                div {
                                    a href=(item.link) target="_blank" class="feed-link" rel="noopener noreferrer" {
                                        "Read more"
                                    }
                                }
                                div class="feed-dt" { (feed::format_pub_date(&item.pub_date)) }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn contact_page(config: &SiteConfig, state: &ContactState) -> Markup {
    html! {
        div class="section" id="contact" {
            div class="container" {
                h2 { "Contact Us" }
                h3 { "Write to us" }
                form id="contact-form" method="post" action=(config.relay_url.as_str()) {
                    input type="email" name="email" value=(state.form.email) placeholder="Your email" required;
                    input type="text" name="subject" value=(state.form.subject) placeholder="Subject" required;
                    textarea name="message" placeholder="Message" required { (state.form.message) }
                    button type="submit" disabled[state.submit_disabled()] {
                        @if state.submitting { "Sending..." } @else { "Send" }
                    }
                }
                @if let Some(message) = state.visible_message() {
                    div class="form-message" role="status" { (message) }
                }
            }
        }
    }
}

fn static_page(config: &SiteConfig, route: Route) -> Markup {
    match route {
        Route::About => about_page(config),
        Route::Events => events_page(config),
        Route::Team => team_page(&config.roster),
        Route::Home | Route::Contact => html! {},
    }
}

fn about_page(config: &SiteConfig) -> Markup {
    html! {
        div class="section" id="about" {
            div class="container" {
                h2 { "About" }
                p {
                    "The " (config.org_name) ", " (config.org_unit)
                    " brings together students who enjoy mathematics: talks with faculty, "
                    "competitions, workshops and a blog on ideas worth sharing."
                }
            }
        }
    }
}

fn events_page(config: &SiteConfig) -> Markup {
    let entries = events::timeline(&config.events);
    html! {
        div class="section" id="events" {
            div class="container" {
                h2 { "Events" }
                div class="timeline" {
                    @for entry in &entries {
                        @let side = match entry.side { Side::Left => "left", Side::Right => "right" };
                        @let next = entry.badge == Badge::NextEvent;
                        div class=(format!("ev-container {side}{}", if next { " latest-upcoming" } else { "" })) {
                            div class="ev-content" {
                                div class="ev-title" { (entry.event.name) }
                                div class="ev-desc" { (entry.event.description) }
                                div class="ev-info" {
                                    div class="ev-date" { (entry.event.date) }
                                    div class="ev-venue" { (entry.event.participation) }
                                }
                                div class="ev-link" {
                                    @let badge_class = match entry.badge {
                                        Badge::NextEvent => "ev-btn next",
                                        Badge::Upcoming => "ev-btn upcoming",
                                        Badge::Completed => "ev-btn completed",
                                    };
                                    span class=(badge_class) { (entry.badge.label()) }
                                }
                            }
                        }
                    }
                }
                p class="note" {
                    i { "*All dates are tentative and subject to change." }
                }
            }
        }
    }
}

fn team_page(roster: &[TeamMember]) -> Markup {
    let sections = team::sections(roster);
    html! {
        div class="section" id="team" {
            div class="container" {
                h2 { "Our Team" }
                @for section in &sections {
                    @let layout = section.layout();
                    div class="team-section" {
                        h3 class="team-section-title" { (section.category.title()) }
                        div class=(layout.row_class()) {
                            @for (i, member) in section.members.iter().enumerate() {
                                div class=(layout.col_class()) {
                                    div class="mem" style=(format!("animation-delay: {}ms", (section.start_index + i) * 100)) {
                                        img class="mem-dp" src=(member.image) alt=(member.name);
                                        div class="mem-name" { (member.name) }
                                        div class="mem-pos" { (member.position) }
                                        @if let Some(social) = &member.social {
                                            (social_links(social))
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn social_links(social: &Social) -> Markup {
    html! {
        div class="mem-social" {
            @if let Some(email) = &social.email {
                a href=(format!("mailto:{email}")) target="_blank" rel="noopener noreferrer" { "Email" }
            }
            @if let Some(url) = &social.linkedin {
                a href=(url) target="_blank" rel="noopener noreferrer" { "LinkedIn" }
            }
            @if let Some(url) = &social.instagram {
                a href=(url) target="_blank" rel="noopener noreferrer" { "Instagram" }
            }
            @if let Some(url) = &social.facebook {
                a href=(url) target="_blank" rel="noopener noreferrer" { "Facebook" }
            }
        }
    }
}
