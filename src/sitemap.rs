//! `sitemap.xml` for the single-page site: the landing page plus its
//! section anchors.

use crate::escape::escape_xml;
use chrono::{DateTime, SecondsFormat, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFrequency {
    Weekly,
    Monthly,
}

impl ChangeFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub url: String,
    pub last_modified: DateTime<Utc>,
    pub change_frequency: ChangeFrequency,
    pub priority: f32,
}

/// (anchor, change frequency, priority); empty anchor is the page itself
const SECTIONS: [(&str, ChangeFrequency, f32); 5] = [
    ("", ChangeFrequency::Weekly, 1.0),
    ("#services", ChangeFrequency::Monthly, 0.9),
    ("#work", ChangeFrequency::Monthly, 0.8),
    ("#approach", ChangeFrequency::Monthly, 0.7),
    ("#contact", ChangeFrequency::Monthly, 0.9),
];

pub fn landing_entries(base_url: &str, now: DateTime<Utc>) -> Vec<SitemapEntry> {
    let base_url = base_url.trim_end_matches('/');

    SECTIONS
        .iter()
        .map(|(anchor, change_frequency, priority)| SitemapEntry {
            url: if anchor.is_empty() {
                base_url.to_string()
            } else {
                format!("{}/{}", base_url, anchor)
            },
            last_modified: now,
            change_frequency: *change_frequency,
            priority: *priority,
        })
        .collect()
}

const URLSET_OPEN: &str = concat!(
    "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
    "<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n"
);

pub fn render_xml(entries: &[SitemapEntry]) -> String {
    let urls: String = entries
        .iter()
        .map(|entry| {
            format!(
                concat!(
                    "  <url>\n",
                    "    <loc>{}</loc>\n",
                    "    <lastmod>{}</lastmod>\n",
                    "    <changefreq>{}</changefreq>\n",
                    "    <priority>{:.1}</priority>\n",
                    "  </url>\n"
                ),
                escape_xml(&entry.url),
                entry.last_modified.to_rfc3339_opts(SecondsFormat::Millis, true),
                entry.change_frequency.as_str(),
                entry.priority
            )
        })
        .collect();

    format!("{}{}</urlset>\n", URLSET_OPEN, urls)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_landing_entries() {
        let entries = landing_entries("https://midastouch.it", fixed_now());
        assert_eq!(entries.len(), 5);
        assert_eq!(entries[0].url, "https://midastouch.it");
        assert_eq!(entries[0].change_frequency, ChangeFrequency::Weekly);
        assert_eq!(entries[1].url, "https://midastouch.it/#services");
        assert_eq!(entries[4].url, "https://midastouch.it/#contact");
        assert_eq!(entries[4].priority, 0.9);
    }

    #[test]
    fn test_trailing_slash_is_ignored() {
        let entries = landing_entries("https://midastouch.it/", fixed_now());
        assert_eq!(entries[0].url, "https://midastouch.it");
        assert_eq!(entries[2].url, "https://midastouch.it/#work");
    }

    #[test]
    fn test_render_xml() {
        let xml = render_xml(&landing_entries("https://midastouch.it", fixed_now()));
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<loc>https://midastouch.it/#approach</loc>"));
        assert!(xml.contains("<lastmod>2025-03-01T12:00:00.000Z</lastmod>"));
        assert!(xml.contains("<changefreq>weekly</changefreq>"));
        assert!(xml.contains("<priority>1.0</priority>"));
        assert!(xml.contains("<priority>0.7</priority>"));
        assert_eq!(xml.matches("<url>").count(), 5);
    }

    #[test]
    fn test_render_xml_escapes_urls() {
        let xml = render_xml(&landing_entries("https://x.it/?a=1&b='2'", fixed_now()));
        assert!(xml.contains("<loc>https://x.it/?a=1&amp;b=&apos;2&apos;</loc>"));
        assert!(xml.ends_with("</urlset>\n"));
    }
}
