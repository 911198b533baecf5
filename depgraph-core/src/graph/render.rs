//! Diagnostic dump of a [`DependencyGraph`].
//!
//! Active nodes come first, one per line as `<node>: #<id>`, suffixed with
//! ` (source)` for sources. Then every edge, one per line as `<src> -> <dest>`.
//! Both sections follow id order, so the output is deterministic.

use std::fmt::{self, Display};
use std::io::{self, Write};

use tracing::warn;

use super::DependencyGraph;
use crate::error::Result;

impl<T: Display> Display for DependencyGraph<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (node, record) in self.iter() {
            write!(f, "{node}: #{}", record.id)?;
            if self.sources.contains(&record.id) {
                f.write_str(" (source)")?;
            }
            writeln!(f)?;
        }
        for (src, dest) in self.edges() {
            writeln!(f, "{src} -> {dest}")?;
        }
        Ok(())
    }
}

impl<T: Display> DependencyGraph<T> {
    /// Write the diagnostic dump to `writer`.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        write!(writer, "{self}")?;
        writer.flush()?;
        Ok(())
    }

    /// Print the diagnostic dump to stdout.
    pub fn print(&self) {
        if let Err(err) = self.write_to(io::stdout().lock()) {
            warn!(%err, "failed to print dependency graph");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphError;

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn dump_lists_nodes_then_edges() {
        let mut graph = DependencyGraph::new();
        graph.add_source("root");
        graph.add_edge("root", "leaf");
        graph.add_edge("mid", "leaf");
        graph.add_edge("root", "mid");

        assert_eq!(
            graph.to_string(),
            "root: #0 (source)\nleaf: #1\nmid: #2\n0 -> 1\n0 -> 2\n2 -> 1\n"
        );
    }

    #[test]
    fn dump_skips_removed_nodes() {
        let mut graph = DependencyGraph::new();
        graph.add_source("a");
        graph.add_edge("a", "b");
        graph.add_edge("b", "c");
        graph.remove_node(&"b");

        assert_eq!(graph.to_string(), "a: #0 (source)\nc: #2\n");
    }

    #[test]
    fn empty_graph_dumps_nothing() {
        let graph: DependencyGraph<String> = DependencyGraph::new();
        assert_eq!(graph.to_string(), "");
    }

    #[test]
    fn write_to_matches_display() {
        let mut graph = DependencyGraph::new();
        graph.add_source(1);
        graph.add_edge(1, 2);

        let mut buf = Vec::new();
        graph.write_to(&mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), graph.to_string());
    }

    #[test]
    fn write_to_reports_io_errors() {
        let mut graph = DependencyGraph::new();
        graph.add_node("a");

        let err = graph.write_to(FailingWriter).unwrap_err();
        assert!(matches!(err, GraphError::Io(_)));
    }
}
