//! Section renderers.
//!
//! Each renderer reads one slice of [`SiteContent`] and, when the slice is
//! present, overwrites its region(s) wholesale. An absent slice leaves the
//! region exactly as the shell had it. Markup is built with Maud, so every
//! interpolated value is escaped; the avatar literal is the one exception
//! (it is inline markup such as an emoji by contract).
//!
//! | Renderer | Regions |
//! |----------|---------|
//! | [`render_site_meta`] | `site-title`, `site-description`, `site-keywords`, `site-author`, `html[lang]` |
//! | [`render_personal_info`] | `profile-avatar`, `profile-name`, `profile-title`, `profile-info` |
//! | [`render_social_links`] | `social-links` |
//! | [`render_skills`] | `skills-section` |
//! | [`render_contact`] | `contact-buttons` |

use crate::labels;
use crate::target::{Region, RenderTarget};
use crate::types::{Contact, PersonalInfo, SiteContent, SiteMeta, truthy_text};
use maud::{Markup, PreEscaped, html};
use serde_json::{Map, Value};
use tracing::warn;

const LOCATION_ICON: &str = "M5.05 4.05a7 7 0 119.9 9.9L10 18.9l-4.95-4.95a7 7 0 010-9.9zM10 11a2 2 0 100-4 2 2 0 000 4z";
const EXPERIENCE_ICON: &str = "M6 2a1 1 0 00-1 1v1H4a2 2 0 00-2 2v10a2 2 0 002 2h12a2 2 0 002-2V6a2 2 0 00-2-2h-1V3a1 1 0 10-2 0v1H7V3a1 1 0 00-1-1zm0 5a1 1 0 000 2h8a1 1 0 100-2H6z";
const GITHUB_ICON: &str = "M12 0C5.37 0 0 5.37 0 12a12 12 0 008.21 11.44c.6.11.82-.26.82-.58v-2.02c-3.34.73-4.04-1.61-4.04-1.61-.55-1.41-1.34-1.79-1.34-1.79-1.09-.74.08-.73.08-.73 1.2.09 1.83 1.24 1.83 1.24 1.07 1.83 2.8 1.3 3.49.99.11-.78.42-1.3.76-1.6-2.67-.3-5.48-1.34-5.48-5.94 0-1.31.47-2.38 1.24-3.22-.12-.3-.54-1.53.12-3.18 0 0 1.01-.32 3.3 1.23a11.5 11.5 0 016 0c2.29-1.55 3.3-1.23 3.3-1.23.66 1.65.24 2.88.12 3.18.77.84 1.24 1.91 1.24 3.22 0 4.61-2.81 5.64-5.49 5.93.43.38.81 1.12.81 2.26v3.35c0 .32.22.7.82.58A12 12 0 0024 12c0-6.63-5.37-12-12-12z";
const LINKEDIN_ICON: &str = "M4.98 3.5C4.98 4.88 3.87 6 2.5 6S0 4.88 0 3.5 1.12 1 2.5 1s2.48 1.12 2.48 2.5zM.5 8h4V24h-4V8zM8.5 8h3.82v2.56h.05c.53-1 1.83-2.06 3.77-2.06C21.36 8.5 24 11.24 24 16.06V24h-4v-7.4c0-1.76-.03-4.04-2.46-4.04-2.47 0-2.85 1.93-2.85 3.92V24h-4V8z";

/// Run every section renderer in page order.
pub fn render_sections(content: &SiteContent, target: &mut impl RenderTarget) {
    if let Some(site) = &content.site {
        render_site_meta(site, target);
    }
    if let Some(info) = &content.personal {
        render_personal_info(info, target);
    }
    if let Some(links) = &content.social_links {
        render_social_links(links, target);
    }
    if let Some(skills) = &content.skills {
        render_skills(skills, target);
    }
    if let Some(contact) = &content.contact {
        render_contact(contact, target);
    }
}

// ============================================================================
// Site metadata
// ============================================================================

pub fn render_site_meta(site: &SiteMeta, target: &mut impl RenderTarget) {
    if let Some(title) = &site.title {
        target.replace(Region::SiteTitle, html! { (title) });
    }
    let metas = [
        (Region::SiteDescription, &site.description),
        (Region::SiteKeywords, &site.keywords),
        (Region::SiteAuthor, &site.author),
    ];
    for (region, value) in metas {
        if let Some(value) = value {
            target.set_attribute(region, "content", value);
        }
    }
    if let Some(language) = &site.language {
        target.set_attribute(Region::Html, "lang", language);
    }
}

// ============================================================================
// Personal info
// ============================================================================

pub fn render_personal_info(info: &PersonalInfo, target: &mut impl RenderTarget) {
    if let Some(avatar) = info.avatar.as_deref().filter(|a| !a.is_empty()) {
        target.replace(Region::ProfileAvatar, avatar_markup(avatar, info.name.as_deref()));
    }
    let name = info.name.as_deref().filter(|n| !n.is_empty());
    target.replace(Region::ProfileName, html! { (name.unwrap_or(labels::NAME_LOADING)) });
    let title = info.title.as_deref().filter(|t| !t.is_empty());
    target.replace(
        Region::ProfileTitle,
        multiline(title.unwrap_or(labels::TITLE_LOADING)),
    );
    target.replace(Region::ProfileInfo, profile_info_markup(info));
}

/// Whether an avatar value points at an image rather than being inline markup.
fn is_image_reference(avatar: &str) -> bool {
    ["./", "../", "/", "http://", "https://"]
        .iter()
        .any(|prefix| avatar.starts_with(prefix))
}

fn avatar_markup(avatar: &str, name: Option<&str>) -> Markup {
    if is_image_reference(avatar) {
        let fallback = format!("this.parentElement.innerHTML='{}'", labels::AVATAR_FALLBACK);
        html! {
            img src=(avatar) alt=(name.unwrap_or_default()) onerror=(fallback);
        }
    } else {
        html! { (PreEscaped(avatar)) }
    }
}

/// Escaped text with every line break (`\r\n`, `\r`, `\n`) turned into `<br>`.
fn multiline(text: &str) -> Markup {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    html! {
        @for (i, line) in normalized.split('\n').enumerate() {
            @if i > 0 { br; }
            (line)
        }
    }
}

fn info_item(icon: &str, text: &str) -> Markup {
    html! {
        div.info-item {
            svg.info-icon fill="currentColor" viewBox="0 0 20 20" {
                path fill-rule="evenodd" d=(icon) clip-rule="evenodd" {}
            }
            span { (text) }
        }
    }
}

fn profile_info_markup(info: &PersonalInfo) -> Markup {
    html! {
        @if let Some(location) = info.location.as_deref().filter(|s| !s.is_empty()) {
            (info_item(LOCATION_ICON, location))
        }
        @if let Some(experience) = info.experience.as_deref().filter(|s| !s.is_empty()) {
            (info_item(EXPERIENCE_ICON, experience))
        }
    }
}

// ============================================================================
// Social links
// ============================================================================

pub fn render_social_links(links: &Map<String, Value>, target: &mut impl RenderTarget) {
    target.replace(Region::SocialLinks, social_links_markup(links));
}

fn social_icon(platform: &str) -> Markup {
    match platform.to_ascii_lowercase().as_str() {
        "github" => html! { path d=(GITHUB_ICON) {} },
        "linkedin" => html! { path d=(LINKEDIN_ICON) {} },
        _ => {
            // Unknown platforms get a lettermark.
            let initial: String = platform.chars().take(1).flat_map(char::to_uppercase).collect();
            html! {
                text x="12" y="17" text-anchor="middle" font-size="14" fill="currentColor" {
                    (initial)
                }
            }
        }
    }
}

fn social_links_markup(links: &Map<String, Value>) -> Markup {
    html! {
        @for (platform, url) in links {
            @if let Some(url) = truthy_text(url) {
                a.social-link href=(url) target="_blank" rel="noopener" title=(platform) {
                    svg.social-icon viewBox="0 0 24 24" xmlns="http://www.w3.org/2000/svg" {
                        (social_icon(platform))
                    }
                }
            }
        }
    }
}

// ============================================================================
// Skills
// ============================================================================

pub fn render_skills(skills: &Map<String, Value>, target: &mut impl RenderTarget) {
    target.replace(Region::Skills, skills_markup(skills));
}

fn skill_label(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn skills_markup(skills: &Map<String, Value>) -> Markup {
    let groups: Vec<(&str, &Vec<Value>)> = skills
        .iter()
        .filter_map(|(category, list)| match list {
            Value::Array(items) if !items.is_empty() => Some((category.as_str(), items)),
            Value::Array(_) => None,
            _ => {
                warn!(category, "skipping skill category that is not a list");
                None
            }
        })
        .collect();

    html! {
        h3 { (labels::SKILLS_HEADING) }
        @for (category, items) in groups {
            div.skill-category {
                h4 { (labels::skill_category(category)) }
                div.skill-tags {
                    @for item in items {
                        span.skill-tag { (skill_label(item)) }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Contact
// ============================================================================

pub fn render_contact(contact: &Contact, target: &mut impl RenderTarget) {
    target.replace(Region::ContactButtons, contact_markup(contact));
}

fn contact_markup(contact: &Contact) -> Markup {
    html! {
        @if let Some(email) = contact.email.as_deref().filter(|s| !s.is_empty()) {
            a.contact-btn.primary id="contact-email" href={ "mailto:" (email) } {
                (labels::CONTACT_ME)
            }
        }
        @if let Some(resume) = contact.resume.as_deref().filter(|s| !s.is_empty()) {
            a.contact-btn.secondary href=(resume) { (labels::DOWNLOAD_RESUME) }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::Document;
    use crate::test_helpers::count;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    // =========================================================================
    // Site metadata
    // =========================================================================

    #[test]
    fn site_meta_sets_title_and_attributes() {
        let mut doc = Document::new();
        let site = SiteMeta {
            title: Some("My <Folio>".into()),
            description: Some("desc".into()),
            keywords: Some("qa, automation".into()),
            author: Some("Lin".into()),
            language: Some("zh-TW".into()),
        };
        render_site_meta(&site, &mut doc);

        assert_eq!(doc.markup(Region::SiteTitle), Some("My &lt;Folio&gt;"));
        assert_eq!(doc.attribute(Region::SiteDescription, "content"), Some("desc"));
        assert_eq!(doc.attribute(Region::SiteKeywords, "content"), Some("qa, automation"));
        assert_eq!(doc.attribute(Region::SiteAuthor, "content"), Some("Lin"));
        assert_eq!(doc.attribute(Region::Html, "lang"), Some("zh-TW"));
    }

    #[test]
    fn site_meta_skips_missing_fields() {
        let mut doc = Document::new();
        render_site_meta(&SiteMeta::default(), &mut doc);
        assert!(!doc.is_touched(Region::SiteTitle));
        assert!(!doc.is_touched(Region::Html));
    }

    // =========================================================================
    // Personal info
    // =========================================================================

    #[test]
    fn avatar_path_renders_image_with_fallback() {
        let mut doc = Document::new();
        let info = PersonalInfo {
            name: Some("Lin".into()),
            avatar: Some("./images/me.png".into()),
            ..Default::default()
        };
        render_personal_info(&info, &mut doc);

        let avatar = doc.markup(Region::ProfileAvatar).unwrap();
        assert!(avatar.contains(r#"<img src="./images/me.png" alt="Lin""#));
        assert!(avatar.contains("onerror="));
        assert!(avatar.contains(labels::AVATAR_FALLBACK));
    }

    #[test]
    fn avatar_url_renders_image() {
        assert!(is_image_reference("https://cdn.example.com/me.jpg"));
        assert!(is_image_reference("/me.jpg"));
        assert!(!is_image_reference("🧑‍🔬"));
    }

    #[test]
    fn avatar_literal_is_inserted_verbatim() {
        let mut doc = Document::new();
        let info = PersonalInfo {
            avatar: Some("🧪".into()),
            ..Default::default()
        };
        render_personal_info(&info, &mut doc);
        assert_eq!(doc.markup(Region::ProfileAvatar), Some("🧪"));
    }

    #[test]
    fn missing_avatar_leaves_region_untouched() {
        let mut doc = Document::new();
        render_personal_info(&PersonalInfo::default(), &mut doc);
        assert!(!doc.is_touched(Region::ProfileAvatar));
    }

    #[test]
    fn name_and_title_fall_back_to_loading_text() {
        let mut doc = Document::new();
        render_personal_info(&PersonalInfo::default(), &mut doc);
        assert_eq!(doc.markup(Region::ProfileName), Some(labels::NAME_LOADING));
        assert_eq!(doc.markup(Region::ProfileTitle), Some(labels::TITLE_LOADING));
    }

    #[test]
    fn title_newlines_become_line_breaks() {
        let mut doc = Document::new();
        let info = PersonalInfo {
            title: Some("QA Engineer\nAutomation\r\nLead".into()),
            ..Default::default()
        };
        render_personal_info(&info, &mut doc);
        assert_eq!(
            doc.markup(Region::ProfileTitle),
            Some("QA Engineer<br>Automation<br>Lead")
        );
    }

    #[test]
    fn profile_info_lists_location_and_experience() {
        let info = PersonalInfo {
            location: Some("Taipei".into()),
            experience: Some("8 years".into()),
            ..Default::default()
        };
        let html = profile_info_markup(&info).into_string();
        assert_eq!(count(&html, "info-item"), 2);
        assert!(html.find("Taipei").unwrap() < html.find("8 years").unwrap());

        let empty = profile_info_markup(&PersonalInfo::default()).into_string();
        assert!(empty.is_empty());
    }

    // =========================================================================
    // Social links
    // =========================================================================

    #[test]
    fn social_links_skip_falsy_urls() {
        let links = map(json!({
            "github": "https://github.com/lin",
            "twitter": "",
            "mastodon": null,
            "linkedin": "https://linkedin.com/in/lin"
        }));
        let html = social_links_markup(&links).into_string();
        assert_eq!(count(&html, "<a class=\"social-link\""), 2);
        assert!(!html.contains("twitter"));
    }

    #[test]
    fn social_links_follow_document_order() {
        let links = map(json!({
            "linkedin": "https://linkedin.com/in/lin",
            "github": "https://github.com/lin"
        }));
        let html = social_links_markup(&links).into_string();
        assert!(html.find("linkedin.com").unwrap() < html.find("github.com").unwrap());
    }

    #[test]
    fn unknown_platform_uses_lettermark() {
        let links = map(json!({ "codepen": "https://codepen.io/lin" }));
        let html = social_links_markup(&links).into_string();
        assert!(html.contains(r#"title="codepen""#));
        assert!(html.contains(">C</text>"));
    }

    // =========================================================================
    // Skills
    // =========================================================================

    #[test]
    fn skills_map_known_categories() {
        let skills = map(json!({
            "programming": ["Python", "Java"],
            "custom": ["Thing"]
        }));
        let html = skills_markup(&skills).into_string();
        assert!(html.starts_with("<h3>技能專長</h3>"));
        assert!(html.contains("<h4>程式語言 / 自動化開發語言</h4>"));
        assert!(html.contains("<h4>custom</h4>"));
        assert_eq!(count(&html, "skill-tag\""), 3);
    }

    #[test]
    fn skills_skip_empty_and_non_list_categories() {
        let skills = map(json!({
            "tools": [],
            "types": "not a list",
            "control": ["Git"]
        }));
        let html = skills_markup(&skills).into_string();
        assert_eq!(count(&html, "skill-category"), 1);
        assert!(html.contains("版本控制 / CI"));
    }

    // =========================================================================
    // Contact
    // =========================================================================

    #[test]
    fn contact_renders_both_actions() {
        let contact = Contact {
            email: Some("lin@example.com".into()),
            resume: Some("./resume.pdf".into()),
        };
        let html = contact_markup(&contact).into_string();
        assert!(html.contains(r#"href="mailto:lin@example.com""#));
        assert!(html.contains(r#"href="./resume.pdf""#));
        assert!(html.contains(labels::CONTACT_ME));
        assert!(html.contains(labels::DOWNLOAD_RESUME));
    }

    #[test]
    fn absent_sections_leave_regions_untouched() {
        let mut doc = Document::new();
        render_sections(&SiteContent::default(), &mut doc);
        for region in Region::SECTIONS {
            assert!(!doc.is_touched(region), "{} was written", region.id());
        }
    }
}
