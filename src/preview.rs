//! Side-by-side HTML preview of a run.
//!
//! Renders a single self-contained page: the original upload on the left,
//! the bordered artifact on the right, both embedded as `data:` URIs so the
//! file can be opened anywhere without its neighbours. The images are shown
//! from the bytes the run already has (the upload and the encoded artifact);
//! nothing is decoded or re-encoded for display.
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.

use crate::pipeline::{Run, RunContext};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use maud::{DOCTYPE, Markup, PreEscaped, html};

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 2rem; background: #f4f4f4; color: #111; }
h1 { font-size: 1.4rem; margin: 0 0 .5rem; }
p.summary { color: #555; margin: 0 0 1.5rem; }
div.columns { display: grid; grid-template-columns: 1fr 1fr; gap: 2rem; align-items: start; }
figure { margin: 0; }
figure img { width: 100%; height: auto; display: block; box-shadow: 0 1px 4px rgba(0,0,0,.25); }
figcaption { font-weight: 600; margin-bottom: .5rem; }
footer { margin-top: 1.5rem; color: #555; }
"#;

/// Build a `data:` URI for an encoded image.
pub fn data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Render the preview page for a finished run.
///
/// Takes shared references only; neither the context nor the run is altered.
pub fn render_preview(ctx: &RunContext<'_>, run: &Run) -> Markup {
    let (width, height) = run.source.dimensions();
    let (new_width, new_height) = run.bordered_dimensions();
    let original_src = data_uri(run.source.format.mime(), ctx.bytes);
    let bordered_src = data_uri(run.artifact.mime, &run.artifact.bytes);

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "Preview: " (ctx.file_name) }
                style { (PreEscaped(STYLE)) }
            }
            body {
                h1 { (ctx.file_name) }
                p.summary {
                    "Original image size: " (width) " × " (height) " pixels. "
                    "Border width: " (run.border) " pixels ("
                    (run.percent.value()) "% of longest dimension)."
                }
                div.columns {
                    figure.original {
                        figcaption { "Original" }
                        img src=(original_src) alt={ "Original " (ctx.file_name) };
                    }
                    figure.bordered {
                        figcaption { "With Border" }
                        img src=(bordered_src) alt={ "Bordered " (ctx.file_name) };
                    }
                }
                footer {
                    "New image size: " (new_width) " × " (new_height) " pixels → "
                    code { (run.artifact.file_name) }
                    " (" (run.artifact.mime) ")"
                }
            }
        }
    }
}
