use url::Url;

use crate::Listing;

const LABEL_COMPANY: &str = "Společnost";
const LABEL_COLLABORATION: &str = "Spolupráce";
const LABEL_LOCATION: &str = "Lokace";
const LABEL_SHIFT: &str = "Úvazek";
const DETAIL_LINK_TEXT: &str = "Více informací zde";

/// Builds the Telegram HTML message for a listing.
///
/// Returns `None` for listings without a name. Lines for absent fields are
/// omitted; the detail link is resolved against `site_base`.
pub fn format_message(listing: &Listing, site_base: &Url) -> Option<String> {
    let name = listing.name.as_deref()?;
    let mut message = format!("<b>{}</b>\n", escape_html(name));

    let lines = [
        (LABEL_COMPANY, listing.company.as_deref()),
        (LABEL_COLLABORATION, listing.collaborations.as_deref()),
        (LABEL_LOCATION, listing.locations.as_deref()),
        (LABEL_SHIFT, listing.shifts.as_deref()),
    ];
    for (label, value) in lines {
        if let Some(value) = value {
            message.push_str(&format!("<b>{label}</b>: {}\n", escape_html(value)));
        }
    }

    if let Some(link) = listing
        .url
        .as_deref()
        .and_then(|path| resolve_detail_link(site_base, path))
    {
        message.push_str(&format!(
            "<a href=\"{}\">{DETAIL_LINK_TEXT}</a>",
            escape_html(link.as_str())
        ));
    }

    Some(message)
}

/// Site-relative paths are joined onto `site_base`; absolute URLs pass through.
pub fn resolve_detail_link(site_base: &Url, path: &str) -> Option<Url> {
    site_base.join(path).ok()
}

/// Escapes the characters Telegram's HTML parse mode treats as markup.
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    escaped
}
