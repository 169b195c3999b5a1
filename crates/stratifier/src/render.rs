//! Diagnostic rendering of the precedence graph.
//!
//! Output is meant for people and graph viewers only. Writing it is
//! best-effort: [`emit_best_effort`] logs failures instead of returning them.

use crate::error::RenderError;
use crate::graph::Polarity;
use crate::precedence_graph::PrecedenceGraph;
use std::fmt::Write as _;
use std::fs;
use std::io::{self, Write};
use tracing::{info, warn};

/// Output flavour of a rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderFormat {
    /// Plain `digraph { ... }` text.
    Dot,
    /// Dot text embedded in a standalone HTML page.
    Html,
}

fn quote(name: &str) -> String {
    format!("\"{}\"", name.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Dot description: one labelled node per relation, one line per edge.
/// Negative edges are dashed.
#[must_use]
pub fn to_dot(graph: &PrecedenceGraph<'_>) -> String {
    let mut out = String::from("digraph {\n");
    for &relation in graph.vertices() {
        let name = quote(&graph.display_name(relation));
        let _ = writeln!(out, "\t{name} [label = {name}];");
    }
    for &relation in graph.vertices() {
        let from = quote(&graph.display_name(relation));
        for (next, polarity) in graph.graph().successor_edges(relation) {
            let to = quote(&graph.display_name(next));
            match polarity {
                Polarity::Positive => {
                    let _ = writeln!(out, "\t{from} -> {to};");
                }
                Polarity::Negative => {
                    let _ = writeln!(out, "\t{from} -> {to} [style = dashed];");
                }
            }
        }
    }
    out.push_str("}\n");
    out
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Wrap dot text in an HTML page that renders it with viz.js.
#[must_use]
pub fn to_html(dot: &str, title: &str) -> String {
    let title = escape_html(title);
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="https://cdn.jsdelivr.net/npm/viz.js@2.1.2/viz.js"></script>
<script src="https://cdn.jsdelivr.net/npm/viz.js@2.1.2/full.render.js"></script>
</head>
<body>
<h1>{title}</h1>
<div id="graph"></div>
<script type="text/vnd.graphviz" id="dot">
{dot}</script>
<script>
new Viz().renderSVGElement(document.getElementById("dot").textContent)
    .then(function (svg) {{ document.getElementById("graph").appendChild(svg); }});
</script>
</body>
</html>
"#
    )
}

/// Render `graph` in the requested format.
#[must_use]
pub fn render(graph: &PrecedenceGraph<'_>, format: RenderFormat, title: &str) -> String {
    let dot = to_dot(graph);
    match format {
        RenderFormat::Dot => dot,
        RenderFormat::Html => to_html(&dot, title),
    }
}

/// Write a rendering to `target`: a file path, or `-` for stdout.
pub fn write_rendering(
    graph: &PrecedenceGraph<'_>,
    format: RenderFormat,
    title: &str,
    target: &str,
) -> Result<(), RenderError> {
    let text = render(graph, format, title);
    let io_err = |source| RenderError::Io {
        target: target.to_string(),
        source,
    };
    if target == "-" {
        let mut stdout = io::stdout().lock();
        stdout.write_all(text.as_bytes()).map_err(io_err)?;
        stdout.flush().map_err(io_err)
    } else {
        fs::write(target, text).map_err(io_err)
    }
}

/// [`write_rendering`], logging instead of failing.
pub fn emit_best_effort(
    graph: &PrecedenceGraph<'_>,
    format: RenderFormat,
    title: &str,
    target: &str,
) {
    match write_rendering(graph, format, title, target) {
        Ok(()) => info!("Wrote precedence graph rendering to {target}"),
        Err(e) => warn!("{e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    fn sample() -> ast::Program {
        program(
            &["a", "b", "c"],
            vec![clause("a", &[pos("b"), neg("c")])],
        )
    }

    #[test]
    fn dot_golden() {
        let p = sample();
        let g = PrecedenceGraph::from_program(&p);
        assert_eq!(
            to_dot(&g),
            "digraph {\n\
             \t\"a\" [label = \"a\"];\n\
             \t\"b\" [label = \"b\"];\n\
             \t\"c\" [label = \"c\"];\n\
             \t\"b\" -> \"a\";\n\
             \t\"c\" -> \"a\" [style = dashed];\n\
             }\n"
        );
    }

    #[test]
    fn dot_is_deterministic() {
        let p = sample();
        assert_eq!(
            to_dot(&PrecedenceGraph::from_program(&p)),
            to_dot(&PrecedenceGraph::from_program(&p))
        );
    }

    #[test]
    fn quotes_are_escaped() {
        assert_eq!(quote("a\"b"), "\"a\\\"b\"");
    }

    #[test]
    fn html_wraps_dot() {
        let html = to_html("digraph {\n}\n", "precedence <graph>");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>precedence &lt;graph&gt;</title>"));
        assert!(html.contains("digraph {\n}\n</script>"));
        assert!(html.trim_end().ends_with("</html>"));
    }

    #[test]
    fn write_rendering_to_file() {
        let p = sample();
        let g = PrecedenceGraph::from_program(&p);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.dot");
        write_rendering(&g, RenderFormat::Dot, "g", path.to_str().unwrap()).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), to_dot(&g));
    }

    #[test]
    fn unwritable_target_is_reported_not_fatal() {
        let p = sample();
        let g = PrecedenceGraph::from_program(&p);
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("missing").join("graph.dot");
        let err = write_rendering(&g, RenderFormat::Dot, "g", bad.to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("graph.dot"));
        // Logs and returns normally.
        emit_best_effort(&g, RenderFormat::Html, "g", bad.to_str().unwrap());
    }
}
