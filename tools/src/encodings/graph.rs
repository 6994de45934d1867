//! # Graph Problems as MaxSAT Reductions
//!
//! - Data types
//! - DIMACS-like input parser
//! - Encodings for minimum vertex cover, maximum clique, and maximum cut
//! - Graphviz DOT output
//!
//! All three encodings allocate exactly one decision variable per node of the
//! graph they are called on, taking every size from that graph alone.

use std::io::{self, Write};

use satreduce::{
    clause,
    instances::Wcnf,
    types::{Assignment, TernaryVal, Var},
};

/// An undirected graph with nodes labeled `1..=n` and edges stored as node
/// pairs with the smaller label first. Self loops are rejected at parse time
/// and duplicate edges collapse to one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Graph {
    n_nodes: usize,
    edges: Vec<(usize, usize)>,
}

impl Graph {
    /// Parses a graph description
    ///
    /// A `p edge <nodes> <edges>` line declares the sizes, lines starting
    /// with `c` are comments, every other non-empty line is
    /// `<tag> <node1> <node2>` with the tag ignored. A mismatch between the
    /// declared and the parsed edge count is reported as a warning on stderr
    /// and processing continues with the parsed edges.
    pub fn from_file(reader: impl io::BufRead) -> anyhow::Result<Self> {
        parsing::parse_dimacs(reader)
    }

    /// Gets the number of nodes
    pub fn n_nodes(&self) -> usize {
        self.n_nodes
    }

    /// Gets the edges, sorted, smaller node first
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    /// Builds the minimum vertex cover formula: every edge needs a selected
    /// endpoint, every selected node costs 1.
    pub fn min_vertex_cover(&self) -> NodeSelection {
        let mut formula = Wcnf::new();
        let nodes = formula.new_vars(self.n_nodes);
        for node in &nodes {
            formula.add_soft(1, clause![node.neg_lit()]);
        }
        for &(a, b) in &self.edges {
            formula.add_hard(clause![nodes[a - 1].pos_lit(), nodes[b - 1].pos_lit()]);
        }
        NodeSelection { formula, nodes }
    }

    /// Builds the maximum clique formula: non-adjacent nodes can never both
    /// be selected, every unselected node costs 1.
    pub fn max_clique(&self) -> NodeSelection {
        let mut formula = Wcnf::new();
        let nodes = formula.new_vars(self.n_nodes);
        for node in &nodes {
            formula.add_soft(1, clause![node.pos_lit()]);
        }
        let mut adjacent = vec![false; self.n_nodes * self.n_nodes];
        for &(a, b) in &self.edges {
            adjacent[(a - 1) * self.n_nodes + (b - 1)] = true;
            adjacent[(b - 1) * self.n_nodes + (a - 1)] = true;
        }
        for i in 0..self.n_nodes {
            for j in i + 1..self.n_nodes {
                if !adjacent[i * self.n_nodes + j] {
                    formula.add_hard(clause![nodes[i].neg_lit(), nodes[j].neg_lit()]);
                }
            }
        }
        NodeSelection { formula, nodes }
    }

    /// Builds the maximum cut formula. Each edge contributes the clause pair
    /// `(a | b)` and `(~a | ~b)`, both soft with weight 1: endpoints in
    /// different partitions falsify exactly one of the pair, endpoints in the
    /// same partition falsify both, so minimizing cost maximizes cut edges.
    pub fn max_cut(&self) -> NodeSelection {
        let mut formula = Wcnf::new();
        let nodes = formula.new_vars(self.n_nodes);
        for &(a, b) in &self.edges {
            let (va, vb) = (nodes[a - 1], nodes[b - 1]);
            formula.add_soft(1, clause![va.pos_lit(), vb.pos_lit()]);
            formula.add_soft(1, clause![va.neg_lit(), vb.neg_lit()]);
        }
        NodeSelection { formula, nodes }
    }

    /// Writes the graph in Graphviz DOT syntax, for rendering with external
    /// tooling
    pub fn write_dot<W: Write>(&self, writer: &mut W) -> Result<(), io::Error> {
        writeln!(writer, "graph {{")?;
        for node in 1..=self.n_nodes {
            writeln!(writer, "    {node};")?;
        }
        for (a, b) in &self.edges {
            writeln!(writer, "    {a} -- {b};")?;
        }
        writeln!(writer, "}}")
    }
}

/// A node selection formula together with its node-variable map
///
/// The variable at position `i` decides node `i + 1`; decoding relies on this
/// correspondence matching the allocation order at build time.
#[derive(Debug)]
pub struct NodeSelection {
    formula: Wcnf,
    nodes: Vec<Var>,
}

impl NodeSelection {
    /// Gets the formula to pass to a solver
    pub fn formula(&self) -> &Wcnf {
        &self.formula
    }

    /// Decodes a solver assignment into the selected node labels
    pub fn decode(&self, assignment: &Assignment) -> Vec<usize> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, &var)| assignment.var_value(var) == TernaryVal::True)
            .map(|(idx, _)| idx + 1)
            .collect()
    }
}

mod parsing {
    use std::io;

    use anyhow::Context;
    use nom::{
        bytes::complete::tag,
        character::complete::{space1, u32},
        error::Error as NomErr,
        sequence::tuple,
    };
    use satreduce::types::RsHashSet;

    pub fn parse_dimacs(mut reader: impl io::BufRead) -> anyhow::Result<super::Graph> {
        let mut header: Option<(usize, usize)> = None;
        let mut edges: RsHashSet<(usize, usize)> = RsHashSet::default();
        let mut buf = String::new();
        let mut line_no = 0;
        while reader.read_line(&mut buf)? > 0 {
            line_no += 1;
            parse_line(&buf, &mut header, &mut edges)
                .with_context(|| format!("failed to parse line {line_no} '{}'", buf.trim_end()))?;
            buf.clear();
        }
        let (n_nodes, n_edges) = header.context("graph description has no 'p edge' line")?;
        for &(a, b) in &edges {
            anyhow::ensure!(
                a >= 1 && b <= n_nodes,
                "edge ({a}, {b}) references a node outside 1..={n_nodes}"
            );
        }
        if n_edges != edges.len() {
            eprintln!(
                "warning: expected {n_edges} edges but parsed {}",
                edges.len()
            );
        }
        // hash set iteration order is arbitrary; sort for deterministic
        // clause order downstream
        let mut edges: Vec<_> = edges.into_iter().collect();
        edges.sort_unstable();
        Ok(super::Graph { n_nodes, edges })
    }

    fn parse_line(
        line: &str,
        header: &mut Option<(usize, usize)>,
        edges: &mut RsHashSet<(usize, usize)>,
    ) -> anyhow::Result<()> {
        let mut tokens = line.split_whitespace();
        let Some(first) = tokens.next() else {
            return Ok(());
        };
        match first {
            "c" => (),
            "p" => {
                let rest = line.trim_start()[1..].trim_start();
                let (_, (_, _, n_nodes, _, n_edges)) =
                    tuple::<_, _, NomErr<_>, _>((tag("edge"), space1, u32, space1, u32))(rest)
                        .map_err(|e| e.to_owned())
                        .context("expected 'p edge <nodes> <edges>'")?;
                *header = Some((n_nodes as usize, n_edges as usize));
            }
            _ => {
                let a: usize = tokens
                    .next()
                    .context("edge line has no first node")?
                    .parse()
                    .context("first node is not an integer")?;
                let b: usize = tokens
                    .next()
                    .context("edge line has no second node")?
                    .parse()
                    .context("second node is not an integer")?;
                anyhow::ensure!(a != b, "self loops are not permitted");
                edges.insert((a.min(b), a.max(b)));
            }
        }
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use std::io::Cursor;

        #[test]
        fn triangle() {
            let data = "c a triangle\np edge 3 3\ne 1 2\ne 2 3\ne 1 3\n";
            let graph = super::parse_dimacs(Cursor::new(data)).unwrap();
            assert_eq!(graph.n_nodes, 3);
            assert_eq!(graph.edges, vec![(1, 2), (1, 3), (2, 3)]);
        }

        #[test]
        fn duplicate_edges_collapse() {
            let data = "p edge 2 1\ne 1 2\ne 2 1\ne 1 2\n";
            let graph = super::parse_dimacs(Cursor::new(data)).unwrap();
            assert_eq!(graph.edges, vec![(1, 2)]);
        }

        #[test]
        fn edge_count_mismatch_is_not_fatal() {
            let data = "p edge 3 5\ne 1 2\n";
            let graph = super::parse_dimacs(Cursor::new(data)).unwrap();
            assert_eq!(graph.edges, vec![(1, 2)]);
        }

        #[test]
        fn self_loop_rejected() {
            let data = "p edge 2 1\ne 1 1\n";
            assert!(super::parse_dimacs(Cursor::new(data)).is_err());
        }

        #[test]
        fn missing_p_line_rejected() {
            assert!(super::parse_dimacs(Cursor::new("e 1 2\n")).is_err());
        }

        #[test]
        fn out_of_range_node_rejected() {
            let data = "p edge 2 1\ne 1 7\n";
            assert!(super::parse_dimacs(Cursor::new(data)).is_err());
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use satreduce::{clause, lit, types::Assignment};

    use super::Graph;

    fn triangle() -> Graph {
        let data = "p edge 3 3\ne 1 2\ne 2 3\ne 1 3\n";
        Graph::from_file(Cursor::new(data)).unwrap()
    }

    fn path() -> Graph {
        let data = "p edge 3 2\ne 1 2\ne 2 3\n";
        Graph::from_file(Cursor::new(data)).unwrap()
    }

    #[test]
    fn vertex_cover_formula_shape() {
        let encoding = triangle().min_vertex_cover();
        let formula = encoding.formula();
        assert_eq!(formula.n_vars(), 3);
        // one unit soft clause per node, selecting costs 1
        assert_eq!(formula.n_softs(), 3);
        assert_eq!(formula.softs()[0], (clause![!lit![0]], 1));
        // one hard clause per edge
        assert_eq!(formula.n_hards(), 3);
        assert_eq!(formula.hards()[0], clause![lit![0], lit![1]]);
    }

    #[test]
    fn clique_formula_shape() {
        let encoding = path().max_clique();
        let formula = encoding.formula();
        assert_eq!(formula.n_vars(), 3);
        assert_eq!(formula.softs()[1], (clause![lit![1]], 1));
        // the only non-adjacent pair is (1, 3)
        assert_eq!(formula.n_hards(), 1);
        assert_eq!(formula.hards()[0], clause![!lit![0], !lit![2]]);
    }

    #[test]
    fn cut_formula_shape() {
        let encoding = path().max_cut();
        let formula = encoding.formula();
        assert_eq!(formula.n_vars(), 3);
        assert_eq!(formula.n_hards(), 0);
        // two soft clauses per edge
        assert_eq!(formula.n_softs(), 4);
        assert_eq!(formula.softs()[0], (clause![lit![0], lit![1]], 1));
        assert_eq!(formula.softs()[1], (clause![!lit![0], !lit![1]], 1));
    }

    #[test]
    fn decode_selected_nodes() {
        let encoding = triangle().min_vertex_cover();
        let assignment = Assignment::from_iter(vec![lit![0], !lit![1], lit![2]]);
        assert_eq!(encoding.decode(&assignment), vec![1, 3]);
    }

    #[test]
    fn dot_output() {
        let mut buf = Vec::new();
        path().write_dot(&mut buf).unwrap();
        let written = String::from_utf8(buf).unwrap();
        let expected = "graph {\n    1;\n    2;\n    3;\n    1 -- 2;\n    2 -- 3;\n}\n";
        assert_eq!(written, expected);
    }
}
