use crate::backend::*;

/// Prints every node of a backend, followed by its edges, with customized indentation.
pub struct GraphDebug<'a, B>
where
    B: Backend,
{
    backend: &'a B,
    init_indent: usize,
    indent_step: usize,
}

impl<'a, B> GraphDebug<'a, B>
where
    B: Backend,
{
    pub fn new(backend: &'a B) -> Self {
        Self {
            backend,
            init_indent: 0,
            indent_step: 2,
        }
    }

    pub fn indent(mut self, init: usize, step: usize) -> Self {
        self.init_indent = init;
        self.indent_step = step;
        self
    }

    fn display_indent(&self, f: &mut std::fmt::Formatter<'_>, level: usize) -> std::fmt::Result {
        let indention = self.init_indent + self.indent_step * level;
        write!(f, "{:indention$}", "")
    }
}

impl<'a, B> std::fmt::Debug for GraphDebug<'a, B>
where
    B: Backend,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for n in self.backend.node_ids() {
            self.display_indent(f, 0)?;
            writeln!(f, "{:?}", n)?;
            let neighbors = self.backend.neighbors(&n).map_err(|_| std::fmt::Error)?;
            for m in neighbors {
                let e = self
                    .backend
                    .edge_id_for(&n, &m)
                    .map_err(|_| std::fmt::Error)?;
                self.display_indent(f, 1)?;
                writeln!(f, "--{:?}-- {:?}", e, m)?;
            }
        }
        Ok(())
    }
}
