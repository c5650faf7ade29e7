use std::path::Path;

use anyhow::Context as _;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TeamMember {
    pub name: String,
    pub position: String,
    pub image: String,
    #[serde(default)]
    pub social: Option<Social>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Social {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub instagram: Option<String>,
    #[serde(default)]
    pub facebook: Option<String>,
}

/// Roster sections, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    OverallCoordinator,
    Coordinator,
    PanelMembers,
    Convenors,
    Executives,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::OverallCoordinator,
        Category::Coordinator,
        Category::PanelMembers,
        Category::Convenors,
        Category::Executives,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Category::OverallCoordinator => "Overall Coordinator",
            Category::Coordinator => "Coordinator",
            Category::PanelMembers => "Panel Members",
            Category::Convenors => "Convenors",
            Category::Executives => "Executives",
        }
    }

    pub fn of(position: &str) -> Option<Category> {
        match position {
            "Overall Coordinator" => Some(Category::OverallCoordinator),
            "Coordinator" => Some(Category::Coordinator),
            "Panel Member" => Some(Category::PanelMembers),
            "Convenor" | "Convener" => Some(Category::Convenors),
            "Executive" => Some(Category::Executives),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Centered, wide single column.
    Featured,
    /// Two by two.
    Quad,
    Grid,
}

impl Layout {
    pub fn row_class(self) -> &'static str {
        match self {
            Layout::Featured | Layout::Quad => "row justify-content-center",
            Layout::Grid => "row",
        }
    }

    pub fn col_class(self) -> &'static str {
        match self {
            Layout::Featured => "col-md-8 col-lg-6",
            Layout::Quad => "col-md-6 col-lg-6",
            Layout::Grid => "col-md-6 col-lg-4",
        }
    }
}

#[derive(Debug)]
pub struct Section<'a> {
    pub category: Category,
    pub members: Vec<&'a TeamMember>,
    /// Position of the first member across all rendered sections.
    pub start_index: usize,
}

impl Section<'_> {
    pub fn layout(&self) -> Layout {
        if self.category == Category::OverallCoordinator {
            Layout::Featured
        } else if self.members.len() == 4 {
            Layout::Quad
        } else {
            Layout::Grid
        }
    }
}

/// Groups the roster by category. Empty sections and unknown positions are
/// left out; roster order is kept within a section.
pub fn sections(roster: &[TeamMember]) -> Vec<Section<'_>> {
    let mut out = Vec::new();
    let mut start_index = 0;
    for category in Category::ALL {
        let members: Vec<&TeamMember> = roster
            .iter()
            .filter(|m| Category::of(&m.position) == Some(category))
            .collect();
        if members.is_empty() {
            continue;
        }
        let len = members.len();
        out.push(Section {
            category,
            members,
            start_index,
        });
        start_index += len;
    }
    out
}

pub fn load_roster(path: &Path) -> anyhow::Result<Vec<TeamMember>> {
    let bytes = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
    let roster: Vec<TeamMember> =
        serde_json::from_slice(&bytes).with_context(|| format!("parse {}", path.display()))?;
    let unplaced = roster
        .iter()
        .filter(|m| Category::of(&m.position).is_none())
        .count();
    if unplaced > 0 {
        tracing::warn!(unplaced, "roster members with unknown positions will not be shown");
    }
    Ok(roster)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(name: &str, position: &str) -> TeamMember {
        TeamMember {
            name: name.to_string(),
            position: position.to_string(),
            image: format!("/img/team/{name}.jpg"),
            social: None,
        }
    }

    #[test]
    fn groups_in_fixed_order_and_skips_empty() {
        let roster = vec![
            member("e1", "Executive"),
            member("c1", "Convener"),
            member("oc", "Overall Coordinator"),
            member("c2", "Convenor"),
            member("x", "Mascot"),
        ];
        let sections = sections(&roster);
        let titles: Vec<_> = sections.iter().map(|s| s.category.title()).collect();
        assert_eq!(titles, ["Overall Coordinator", "Convenors", "Executives"]);

        let convenors: Vec<_> = sections[1].members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(convenors, ["c1", "c2"]);
        assert_eq!(sections[1].start_index, 1);
        assert_eq!(sections[2].start_index, 3);
    }

    #[test]
    fn layout_depends_on_category_and_size() {
        let roster: Vec<_> = (0..4)
            .map(|i| member(&format!("p{i}"), "Panel Member"))
            .chain([member("oc", "Overall Coordinator"), member("c", "Coordinator")])
            .collect();
        let sections = sections(&roster);
        assert_eq!(sections[0].layout(), Layout::Featured);
        assert_eq!(sections[1].layout(), Layout::Grid);
        assert_eq!(sections[2].layout(), Layout::Quad);
    }

    #[test]
    fn social_links_are_optional() {
        let json = r#"[{"name":"A","position":"Executive","image":"/a.jpg",
            "social":{"email":"a@x.org"}},{"name":"B","position":"Coordinator","image":"/b.jpg"}]"#;
        let roster: Vec<TeamMember> = serde_json::from_str(json).unwrap();
        let social = roster[0].social.as_ref().unwrap();
        assert_eq!(social.email.as_deref(), Some("a@x.org"));
        assert!(social.linkedin.is_none());
        assert!(roster[1].social.is_none());
    }
}
