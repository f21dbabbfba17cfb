//! Standalone HTML viewer for the Mermaid diagram.

use crate::model::Schema;

const MERMAID_CDN: &str = "https://cdn.jsdelivr.net/npm/mermaid@10/dist/mermaid.min.js";

/// Render an HTML page embedding `mermaid`.
///
/// `generated_at` is the only part of the page that varies between runs
/// over the same schema.
pub fn render_html(schema: &Schema, mermaid: &str, generated_at: &str) -> String {
    let stats = schema.stats();
    let stat_cards = [
        ("tables", "Tables", stats.tables),
        ("relationships", "Relationships", stats.relationships),
        ("columns", "Columns", stats.columns),
        ("modules", "Modules", stats.modules),
    ]
    .iter()
    .map(|(id, label, value)| {
        format!(
            "      <div class=\"stat\"><span class=\"stat-value\" id=\"stat-{}\">{}</span><span class=\"stat-label\">{}</span></div>\n",
            id, value, label
        )
    })
    .collect::<String>();

    TEMPLATE
        .replace("{{CDN}}", MERMAID_CDN)
        .replace("{{STATS}}", &stat_cards)
        .replace("{{GENERATED_AT}}", &escape(generated_at))
        .replace("{{DIAGRAM}}", &escape(mermaid))
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

const TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Database ERD</title>
  <script src="{{CDN}}"></script>
  <style>
    :root { --bg: #f8fafc; --fg: #0f172a; --card: #ffffff; --border: #e2e8f0; --accent: #2563eb; }
    body.dark { --bg: #0f172a; --fg: #e2e8f0; --card: #1e293b; --border: #334155; --accent: #60a5fa; }
    * { box-sizing: border-box; }
    body { margin: 0; font-family: system-ui, -apple-system, sans-serif; background: var(--bg); color: var(--fg); }
    header { padding: 1.5rem 2rem; border-bottom: 1px solid var(--border); }
    h1 { margin: 0 0 0.25rem; font-size: 1.5rem; }
    .generated { font-size: 0.85rem; opacity: 0.7; }
    .stats { display: flex; gap: 1rem; padding: 1rem 2rem; flex-wrap: wrap; }
    .stat { background: var(--card); border: 1px solid var(--border); border-radius: 8px; padding: 0.75rem 1.25rem; min-width: 140px; }
    .stat-value { display: block; font-size: 1.75rem; font-weight: 700; color: var(--accent); }
    .stat-label { font-size: 0.8rem; text-transform: uppercase; letter-spacing: 0.05em; opacity: 0.8; }
    .controls { display: flex; gap: 0.5rem; padding: 0 2rem 1rem; }
    .controls button { background: var(--card); color: var(--fg); border: 1px solid var(--border); border-radius: 6px; padding: 0.4rem 0.9rem; cursor: pointer; }
    .controls button:hover { border-color: var(--accent); }
    #diagram-container { margin: 0 2rem 2rem; background: var(--card); border: 1px solid var(--border); border-radius: 8px; overflow: auto; height: calc(100vh - 260px); }
    #diagram { transform-origin: 0 0; padding: 1rem; }
  </style>
</head>
<body>
  <header>
    <h1>Database Entity-Relationship Diagram</h1>
    <div class="generated">Generated: {{GENERATED_AT}}</div>
  </header>
  <section class="stats">
{{STATS}}  </section>
  <nav class="controls">
    <button id="zoom-in" type="button">Zoom In</button>
    <button id="zoom-out" type="button">Zoom Out</button>
    <button id="zoom-reset" type="button">Reset</button>
    <button id="export-svg" type="button">Export SVG</button>
    <button id="toggle-theme" type="button">Toggle Theme</button>
  </nav>
  <main id="diagram-container">
    <div id="diagram">
<pre class="mermaid">
{{DIAGRAM}}</pre>
    </div>
  </main>
  <script>
    mermaid.initialize({ startOnLoad: true, theme: 'default', er: { useMaxWidth: false }, maxTextSize: 500000 });

    let scale = 1;
    const diagram = document.getElementById('diagram');
    const applyZoom = () => { diagram.style.transform = 'scale(' + scale + ')'; };

    document.getElementById('zoom-in').addEventListener('click', () => { scale = Math.min(scale * 1.2, 5); applyZoom(); });
    document.getElementById('zoom-out').addEventListener('click', () => { scale = Math.max(scale / 1.2, 0.1); applyZoom(); });
    document.getElementById('zoom-reset').addEventListener('click', () => { scale = 1; applyZoom(); });

    document.getElementById('export-svg').addEventListener('click', () => {
      const svg = diagram.querySelector('svg');
      if (!svg) return;
      const blob = new Blob([new XMLSerializer().serializeToString(svg)], { type: 'image/svg+xml' });
      const link = document.createElement('a');
      link.href = URL.createObjectURL(blob);
      link.download = 'database-erd.svg';
      link.click();
      URL.revokeObjectURL(link.href);
    });

    document.getElementById('toggle-theme').addEventListener('click', () => {
      document.body.classList.toggle('dark');
      const svg = diagram.querySelector('svg');
      if (svg) svg.style.filter = document.body.classList.contains('dark') ? 'invert(0.9) hue-rotate(180deg)' : '';
    });
  </script>
</body>
</html>
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Column, Table};

    #[test]
    fn test_stats_and_diagram() {
        let mut schema = Schema::new();
        let mut users = Table::new("users", "Core");
        users.columns.push(Column::new("id", "UUID"));
        schema.insert(users);

        let html = render_html(&schema, "erDiagram\n    users\n", "2024-01-01 00:00:00 UTC");
        assert!(html.contains("<span class=\"stat-value\" id=\"stat-tables\">1</span>"));
        assert!(html.contains("id=\"stat-relationships\">0</span>"));
        assert!(html.contains("id=\"stat-columns\">1</span>"));
        assert!(html.contains("id=\"stat-modules\">1</span>"));
        assert!(html.contains("Generated: 2024-01-01 00:00:00 UTC"));
        assert!(html.contains("<pre class=\"mermaid\">\nerDiagram\n    users\n</pre>"));
        assert!(html.contains(MERMAID_CDN));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn test_escapes_diagram() {
        let html = render_html(&Schema::new(), "a ||--o{ b : \"x<y\"\n", "now");
        assert!(html.contains("a ||--o{ b : &quot;x&lt;y&quot;"));
    }
}
