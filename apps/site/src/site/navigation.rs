use crate::site::models::NavEntry;

const INDENT: &str = "        ";

/// Renders the menu items, one `<li>` per entry, marking the entry whose
/// target page is `active`. `None` marks nothing (used by the 404 page).
pub fn render_nav(entries: &[NavEntry], active: Option<&str>) -> String {
    entries
        .iter()
        .map(|entry| {
            let marker = if active == Some(entry.page.as_str()) {
                r#" class="active" aria-current="page""#
            } else {
                ""
            };
            format!(
                r#"{INDENT}<li id="{id}"{marker}><a href="{route}">{label}</a></li>"#,
                id = entry.page,
                route = entry.route,
                label = entry.label,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(page: &str, route: &str, order: u32) -> NavEntry {
        NavEntry {
            label: page.to_string(),
            page: page.to_string(),
            route: route.to_string(),
            order,
        }
    }

    fn sample() -> Vec<NavEntry> {
        vec![entry("home", "/", 0), entry("download", "/download", 1)]
    }

    #[test]
    fn test_marks_only_the_active_entry() {
        let html = render_nav(&sample(), Some("download"));
        assert!(html.contains(
            r#"<li id="download" class="active" aria-current="page"><a href="/download">download</a></li>"#
        ));
        assert!(html.contains(r#"<li id="home"><a href="/">home</a></li>"#));
        assert_eq!(html.matches("class=\"active\"").count(), 1);
    }

    #[test]
    fn test_no_active_entry() {
        let html = render_nav(&sample(), None);
        assert!(!html.contains("active"));
        assert_eq!(html.lines().count(), 2);
    }

    #[test]
    fn test_preserves_entry_order() {
        let html = render_nav(&sample(), None);
        let home = html.find("id=\"home\"").unwrap();
        let download = html.find("id=\"download\"").unwrap();
        assert!(home < download);
    }

    #[test]
    fn test_empty_menu() {
        assert_eq!(render_nav(&[], Some("home")), "");
    }
}
