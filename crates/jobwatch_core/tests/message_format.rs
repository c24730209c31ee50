use jobwatch_core::{escape_html, format_message, resolve_detail_link, Listing, ListingId};
use pretty_assertions::assert_eq;
use url::Url;

fn site() -> Url {
    Url::parse("https://www.startupjobs.cz").unwrap()
}

fn named(name: &str) -> Listing {
    Listing {
        id: Some(ListingId::new("1")),
        name: Some(name.to_string()),
        ..Listing::default()
    }
}

#[test]
fn full_listing_renders_every_line() {
    let listing = Listing {
        company: Some("Acme".to_string()),
        collaborations: Some("HPP".to_string()),
        locations: Some("Brno".to_string()),
        shifts: Some("Full-time".to_string()),
        url: Some("/nabidka/1/dev".to_string()),
        ..named("Developer")
    };

    let message = format_message(&listing, &site()).unwrap();
    assert_eq!(
        message,
        "<b>Developer</b>\n\
         <b>Společnost</b>: Acme\n\
         <b>Spolupráce</b>: HPP\n\
         <b>Lokace</b>: Brno\n\
         <b>Úvazek</b>: Full-time\n\
         <a href=\"https://www.startupjobs.cz/nabidka/1/dev\">Více informací zde</a>"
    );
}

#[test]
fn absent_fields_are_omitted() {
    let listing = Listing {
        locations: Some("Praha".to_string()),
        ..named("Tester")
    };

    let message = format_message(&listing, &site()).unwrap();
    assert_eq!(message, "<b>Tester</b>\n<b>Lokace</b>: Praha\n");
}

#[test]
fn nameless_listing_has_no_message() {
    let listing = Listing {
        company: Some("Acme".to_string()),
        ..Listing::default()
    };
    assert_eq!(format_message(&listing, &site()), None);
}

#[test]
fn markup_in_listing_text_is_escaped() {
    let listing = Listing {
        company: Some("Smith & <Sons>".to_string()),
        ..named("C++ \"Guru\"")
    };

    let message = format_message(&listing, &site()).unwrap();
    assert!(message.starts_with("<b>C++ &quot;Guru&quot;</b>\n"));
    assert!(message.contains("<b>Společnost</b>: Smith &amp; &lt;Sons&gt;\n"));
}

#[test]
fn absolute_detail_links_pass_through() {
    let link = resolve_detail_link(&site(), "https://jobs.example.com/a?b=1").unwrap();
    assert_eq!(link.as_str(), "https://jobs.example.com/a?b=1");

    let link = resolve_detail_link(&site(), "/nabidka/9").unwrap();
    assert_eq!(link.as_str(), "https://www.startupjobs.cz/nabidka/9");
}

#[test]
fn escape_leaves_plain_text_alone() {
    assert_eq!(escape_html("Praha, Brno"), "Praha, Brno");
}
