//! Default tag set, installed at engine construction.
//!
//! Seeds the standard head tags so a freshly built engine renders
//! something sensible with zero caller setup:
//!
//! | Tag | Template | Default value |
//! |---|---|---|
//! | `title` | `<title>{value:60}</title>` | subject `title` field |
//! | `og:title` | meta tag, truncate 95 | subject `title` field |
//! | `og:image` | meta tag | first image in the configured fallback dir |
//! | `og:image:type` | meta tag | MIME of the resolved `og:image` |
//! | `og:image:width` | meta tag | width of the scaled `og:image` |
//! | `og:image:height` | meta tag | height of the scaled `og:image` |
//! | `og:image:alt` | meta tag, truncate 95 | the `title` tag's raw value |
//!
//! Everything goes through the public setters, so caller registration
//! after construction wins with no special casing.
//!
//! The `og:image` default is best-effort: a missing directory or a broken
//! image must not take down rendering, so failures are logged and swallow
//! to no value. Custom providers get no such guard — wrapping them is the
//! caller's choice.

use crate::engine::Seo;
use crate::values::{Provider, RawValue};

pub(crate) fn install(seo: &mut Seo) {
    // title / og:title share one provider
    seo.set_markup("title", "<title>{value:60}</title>");
    seo.set_markup("og:title", r#"<meta property="og:title" content="{value:95}">"#);
    seo.set_value_each(
        &["title", "og:title"],
        Provider::computed(|seo| Ok(RawValue::from(seo.subject().field("title")))),
    );

    // og:image, converted to a URL at the string layer
    seo.set_markup("og:image", r#"<meta property="og:image" content="{value}">"#);
    seo.set_value(
        "og:image",
        Provider::computed(|seo| {
            Ok(match seo.images().fallback_image() {
                Ok(Some(asset)) => RawValue::Image(asset),
                Ok(None) => RawValue::Empty,
                Err(err) => {
                    tracing::warn!("default og:image fallback failed: {}", err);
                    RawValue::Empty
                }
            })
        }),
    );
    seo.set_converter("og:image", |raw, images| images.image_url(raw));

    // Derived og:image:* tags re-resolve og:image's raw value
    seo.set_markup(
        "og:image:type",
        r#"<meta property="og:image:type" content="{value}">"#,
    );
    seo.set_value(
        "og:image:type",
        Provider::computed(|seo| {
            let image = seo.raw("og:image")?;
            let info = seo.images().image_info(&image, true);
            Ok(if info.mime.is_empty() {
                RawValue::Empty
            } else {
                RawValue::Text(info.mime)
            })
        }),
    );

    seo.set_markup(
        "og:image:width",
        r#"<meta property="og:image:width" content="{value}">"#,
    );
    seo.set_value(
        "og:image:width",
        Provider::computed(|seo| {
            let image = seo.raw("og:image")?;
            let info = seo.images().image_info(&image, true);
            Ok(dimension_value(info.width))
        }),
    );

    seo.set_markup(
        "og:image:height",
        r#"<meta property="og:image:height" content="{value}">"#,
    );
    seo.set_value(
        "og:image:height",
        Provider::computed(|seo| {
            let image = seo.raw("og:image")?;
            let info = seo.images().image_info(&image, true);
            Ok(dimension_value(info.height))
        }),
    );

    seo.set_markup(
        "og:image:alt",
        r#"<meta property="og:image:alt" content="{value:95}">"#,
    );
    seo.set_value(
        "og:image:alt",
        Provider::computed(|seo| seo.raw("title")),
    );
}

/// Empty descriptors carry zero dimensions; render those as no value, not
/// as a literal `0`.
fn dimension_value(dimension: u32) -> RawValue {
    if dimension == 0 {
        RawValue::Empty
    } else {
        RawValue::from(dimension)
    }
}
