//! Human-readable rendering of a query graph

use std::fmt::{self, Write};

use super::QueryGraph;

impl QueryGraph {
    /// Render the graph as indented text
    ///
    /// ```text
    /// Order
    ///   joins: customer
    ///   fields: id, total, customer__name
    ///   order by: -total
    ///   eager-loaded:
    ///     items: LineItem
    ///       fields: sku, qty
    /// ```
    pub fn describe(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.render(&mut out, 0);
        out
    }

    fn render<W: Write>(&self, out: &mut W, indent: usize) -> fmt::Result {
        let pad = indent + 2;
        write!(out, "{}", self.model_name())?;

        if !self.select_related.is_empty() {
            write!(out, "\n{:pad$}joins: {}", "", self.select_related.join(", "))?;
        }

        write!(out, "\n{:pad$}fields: {}", "", self.field_names.join(", "))?;

        if let Some(keys) = self.ordering.explicit_keys() {
            let keys: Vec<&str> = keys.iter().map(|k| k.as_str()).collect();
            write!(out, "\n{:pad$}order by: {}", "", keys.join(", "))?;
        }

        if !self.prefetch.is_empty() {
            write!(out, "\n{:pad$}eager-loaded:", "")?;
            for (path, graph) in &self.prefetch {
                write!(out, "\n{:width$}{}: ", "", path, width = pad + 2)?;
                graph.render(out, pad + 2)?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for QueryGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, 0)
    }
}
