//! Site navigation menu.
//!
//! The menu is a static tree. Items are never mutated after construction;
//! a different menu is a different constant.

use std::borrow::Cow;

/// One menu entry, possibly with a dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    /// Visible text.
    pub label: &'static str,
    /// Route.
    pub path: &'static str,
    /// Explicit test hook; derived from the path when absent.
    pub test_id: Option<&'static str>,
    /// Explicit accessible label; derived from the label when absent.
    pub aria_label: Option<&'static str>,
    /// Icon name.
    pub icon: Option<&'static str>,
    /// Dropdown entries.
    pub children: &'static [NavItem],
}

impl NavItem {
    /// A leaf item with derived hooks.
    pub const fn new(label: &'static str, path: &'static str) -> Self {
        Self { label, path, test_id: None, aria_label: None, icon: None, children: &[] }
    }

    /// Set the test hook.
    #[must_use]
    pub const fn with_test_id(mut self, test_id: &'static str) -> Self {
        self.test_id = Some(test_id);
        self
    }

    /// Set the accessible label.
    #[must_use]
    pub const fn with_aria_label(mut self, aria_label: &'static str) -> Self {
        self.aria_label = Some(aria_label);
        self
    }

    /// Attach a dropdown.
    #[must_use]
    pub const fn with_children(mut self, children: &'static [Self]) -> Self {
        self.children = children;
        self
    }

    /// Test hook, `nav-` plus the path with slashes as dashes unless set.
    pub fn test_id(&self) -> Cow<'static, str> {
        self.test_id
            .map_or_else(|| Cow::Owned(format!("nav-{}", self.path.replace('/', "-"))), Cow::Borrowed)
    }

    /// Accessible label, `Navigate to <label>` unless set.
    pub fn aria_label(&self) -> Cow<'static, str> {
        self.aria_label
            .map_or_else(|| Cow::Owned(format!("Navigate to {}", self.label)), Cow::Borrowed)
    }

    /// Whether the item opens a dropdown.
    pub const fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Whether `current` is this route or below it.
    pub fn is_active(&self, current: &str) -> bool {
        if self.path == "/" {
            return current == "/";
        }
        current == self.path
            || current.strip_prefix(self.path).is_some_and(|rest| rest.starts_with('/'))
    }
}

const ABOUT: &[NavItem] = &[
    NavItem::new("Our Story", "/about/story").with_test_id("nav-about-story"),
    NavItem::new("Our Mission", "/about/mission").with_test_id("nav-about-mission"),
    NavItem::new("Leadership", "/about/leadership").with_test_id("nav-about-leadership"),
    NavItem::new("Beliefs", "/about/beliefs").with_test_id("nav-about-beliefs"),
];

const MINISTRIES: &[NavItem] = &[
    NavItem::new("Youth Ministry", "/ministries/youth").with_test_id("nav-ministries-youth"),
    NavItem::new("Children's Ministry", "/ministries/children").with_test_id("nav-ministries-children"),
    NavItem::new("Worship Team", "/ministries/worship").with_test_id("nav-ministries-worship"),
    NavItem::new("Community Outreach", "/ministries/outreach").with_test_id("nav-ministries-outreach"),
    NavItem::new("Small Groups", "/ministries/groups").with_test_id("nav-ministries-groups"),
];

const EVENTS: &[NavItem] = &[
    NavItem::new("Upcoming Events", "/events/upcoming").with_test_id("nav-events-upcoming"),
    NavItem::new("Weekly Services", "/events/services").with_test_id("nav-events-services"),
    NavItem::new("Special Events", "/events/special").with_test_id("nav-events-special"),
    NavItem::new("Calendar", "/events/calendar").with_test_id("nav-events-calendar"),
];

const GIVE: &[NavItem] = &[
    NavItem::new("Online Giving", "/give/online").with_test_id("nav-give-online"),
    NavItem::new("Ways to Give", "/give/ways").with_test_id("nav-give-ways"),
    NavItem::new("Impact Stories", "/give/impact").with_test_id("nav-give-impact"),
];

/// The main menu.
pub const MENU: &[NavItem] = &[
    NavItem::new("Home", "/").with_test_id("nav-home").with_aria_label("Navigate to Home page"),
    NavItem::new("About", "/about")
        .with_test_id("nav-about")
        .with_aria_label("Navigate to About page")
        .with_children(ABOUT),
    NavItem::new("Ministries", "/ministries")
        .with_test_id("nav-ministries")
        .with_aria_label("Navigate to Ministries page")
        .with_children(MINISTRIES),
    NavItem::new("Events", "/events")
        .with_test_id("nav-events")
        .with_aria_label("Navigate to Events page")
        .with_children(EVENTS),
    NavItem::new("Give", "/give")
        .with_test_id("nav-give")
        .with_aria_label("Navigate to Give page")
        .with_children(GIVE),
    NavItem::new("Contact", "/contact").with_test_id("nav-contact").with_aria_label("Navigate to Contact page"),
];

/// Depth-first lookup by exact path.
pub fn find(path: &str) -> Option<&'static NavItem> {
    fn walk(items: &'static [NavItem], path: &str) -> Option<&'static NavItem> {
        items.iter().find_map(|item| if item.path == path { Some(item) } else { walk(item.children, path) })
    }
    walk(MENU, path)
}
