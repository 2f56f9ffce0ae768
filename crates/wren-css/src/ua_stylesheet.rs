//! User-Agent Stylesheet
//!
//! [WHATWG HTML § 15 Rendering](https://html.spec.whatwg.org/multipage/rendering.html)
//!
//! "User agents are expected to have a default style sheet that presents elements
//! of HTML documents in ways consistent with general user expectations."
//!
//! The loader puts these rules first, so an author rule of equal priority
//! overrides them.

use std::sync::OnceLock;

use crate::parser::Stylesheet;

/// Default rules for the elements the renderer styles specially.
const UA_CSS: &str = r"
/* Preformatted text sits on a gray panel. */
pre { background-color: gray; }

a { color: blue; }
i { font-style: italic; }
em { font-style: italic; }
b { font-weight: bold; }
strong { font-weight: bold; }
small { font-size: 90%; }
big { font-size: 110%; }
";

/// The parsed user-agent stylesheet, built on first use.
#[must_use]
pub fn ua_stylesheet() -> &'static Stylesheet {
    static SHEET: OnceLock<Stylesheet> = OnceLock::new();
    SHEET.get_or_init(|| Stylesheet::parse(UA_CSS))
}
