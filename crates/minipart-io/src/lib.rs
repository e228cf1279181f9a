//! Minipart IO - hMETIS `.hgr` and solution file formats
//!
//! The `.hgr` format: a header line `<n_hedges> <n_nodes> [params]` where
//! `params` is 0 (unweighted, the default), 1 (hyperedge weights), 10 (node
//! weights) or 11 (both); one line per hyperedge with an optional leading
//! weight followed by 1-based pin indices; then one node weight per line
//! when node weights are enabled. Lines starting with `%` and blank lines
//! are comments.
//!
//! The solution format is one block index per line, in node order.
//!
//! All parse errors carry the 1-based line number of the offending line.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use minipart_core::{Hypergraph, HypergraphBuilder, PartitionError, Result, Solution};
use minipart_core::Index;

/// Line-counting reader that skips comments and blank lines.
struct LineSource<R> {
    lines: std::io::Lines<R>,
    line_no: usize,
}

impl<R: BufRead> LineSource<R> {
    fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
        }
    }

    /// The next content line with its 1-based line number.
    fn next_content(&mut self) -> Result<Option<(usize, String)>> {
        for line in self.lines.by_ref() {
            self.line_no += 1;
            let line = line?;
            if line.trim().is_empty() || line.starts_with('%') {
                continue;
            }
            return Ok(Some((self.line_no, line)));
        }
        Ok(None)
    }

    /// Like `next_content`, but running out of lines is an error.
    fn expect_content(&mut self, what: &str) -> Result<(usize, String)> {
        self.next_content()?.ok_or_else(|| {
            PartitionError::parse(self.line_no + 1, format!("missing {what} line"))
        })
    }
}

fn parse_fields(line_no: usize, line: &str) -> Result<Vec<Index>> {
    line.split_whitespace()
        .map(|field| {
            field
                .parse::<Index>()
                .map_err(|_| PartitionError::parse(line_no, format!("invalid integer '{field}'")))
        })
        .collect()
}

/// Reads an hMETIS hypergraph.
pub fn read_hgr<R: BufRead>(reader: R) -> Result<Hypergraph> {
    let mut source = LineSource::new(reader);
    let (header_no, header) = source.expect_content("header")?;
    let fields = parse_fields(header_no, &header)?;
    let (n_hedges, n_nodes, params) = match fields.as_slice() {
        [h, n] => (*h, *n, 0),
        [h, n, p] => (*h, *n, *p),
        _ => {
            return Err(PartitionError::parse(
                header_no,
                "header must be '<n_hedges> <n_nodes> [params]'",
            ))
        }
    };
    if n_hedges < 0 || n_nodes < 0 {
        return Err(PartitionError::parse(header_no, "negative entity count"));
    }
    if !matches!(params, 0 | 1 | 10 | 11) {
        return Err(PartitionError::parse(
            header_no,
            format!("parameter value {params} is not one of 0, 1, 10, 11"),
        ));
    }
    let has_hedge_weights = params == 1 || params == 11;
    let has_node_weights = params == 10 || params == 11;

    let mut builder = HypergraphBuilder::new(n_nodes);
    for _ in 0..n_hedges {
        let (line_no, line) = source.expect_content("hyperedge")?;
        let mut fields = parse_fields(line_no, &line)?;
        let weight = if has_hedge_weights {
            if fields.is_empty() {
                return Err(PartitionError::parse(line_no, "missing hyperedge weight"));
            }
            fields.remove(0)
        } else {
            1
        };
        if fields.is_empty() {
            return Err(PartitionError::parse(line_no, "hyperedge has no pins"));
        }
        for pin in fields.iter_mut() {
            if *pin == 0 {
                return Err(PartitionError::parse(line_no, "pin index cannot be 0"));
            }
            if *pin > n_nodes || *pin < 0 {
                return Err(PartitionError::parse(
                    line_no,
                    format!("pin index {pin} is outside the {n_nodes} declared nodes"),
                ));
            }
            *pin -= 1;
        }
        builder.add_hedge(&[weight], &fields)?;
    }

    if has_node_weights {
        for node in 0..n_nodes {
            let (line_no, line) = source.expect_content("node weight")?;
            let fields = parse_fields(line_no, &line)?;
            let [weight] = fields.as_slice() else {
                return Err(PartitionError::parse(
                    line_no,
                    "each node must have exactly one weight",
                ));
            };
            builder.set_node_weights(node, &[*weight])?;
        }
    }

    builder.finalize()
}

/// Reads an hMETIS hypergraph from a file.
pub fn read_hgr_file(path: impl AsRef<Path>) -> Result<Hypergraph> {
    read_hgr(BufReader::new(File::open(path)?))
}

/// Writes a hypergraph in hMETIS format with both weight kinds.
pub fn write_hgr<W: Write>(mut writer: W, hypergraph: &Hypergraph) -> Result<()> {
    writeln!(writer, "% HGR file generated by minipart")?;
    writeln!(
        writer,
        "% {} nodes, {} hyperedges",
        hypergraph.n_nodes(),
        hypergraph.n_hedges()
    )?;
    writeln!(
        writer,
        "{} {} 11",
        hypergraph.n_hedges(),
        hypergraph.n_nodes()
    )?;
    for hedge in 0..hypergraph.n_hedges() {
        write!(writer, "{}", hypergraph.hedge_weight(hedge, 0))?;
        for &pin in hypergraph.hedge_pins(hedge) {
            write!(writer, " {}", pin + 1)?;
        }
        writeln!(writer)?;
    }
    for node in 0..hypergraph.n_nodes() {
        writeln!(writer, "{}", hypergraph.node_weight(node, 0))?;
    }
    Ok(())
}

/// Writes a hypergraph to a file in hMETIS format.
pub fn write_hgr_file(path: impl AsRef<Path>, hypergraph: &Hypergraph) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_hgr(&mut writer, hypergraph)?;
    writer.flush()?;
    Ok(())
}

/// Reads a solution: one block index per line, one line per node.
pub fn read_solution<R: BufRead>(reader: R, n_nodes: Index, n_blocks: Index) -> Result<Solution> {
    let mut source = LineSource::new(reader);
    let mut parts = Vec::with_capacity(n_nodes as usize);
    for _ in 0..n_nodes {
        let (line_no, line) = source.expect_content("block assignment")?;
        let fields = parse_fields(line_no, &line)?;
        let [block] = fields.as_slice() else {
            return Err(PartitionError::parse(
                line_no,
                "each line must hold exactly one block index",
            ));
        };
        if *block < 0 || *block >= n_blocks {
            return Err(PartitionError::parse(
                line_no,
                format!("block {block} is outside the {n_blocks} blocks"),
            ));
        }
        parts.push(*block);
    }
    Ok(Solution::with_blocks(parts, n_blocks))
}

/// Reads a solution from a file.
pub fn read_solution_file(
    path: impl AsRef<Path>,
    n_nodes: Index,
    n_blocks: Index,
) -> Result<Solution> {
    read_solution(BufReader::new(File::open(path)?), n_nodes, n_blocks)
}

/// Writes a solution: the block of node 0, node 1, ... one per line.
pub fn write_solution<W: Write>(mut writer: W, solution: &Solution) -> Result<()> {
    for node in 0..solution.n_nodes() {
        writeln!(writer, "{}", solution[node])?;
    }
    Ok(())
}

/// Writes a solution to a file.
pub fn write_solution_file(path: impl AsRef<Path>, solution: &Solution) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_solution(&mut writer, solution)?;
    writer.flush()?;
    Ok(())
}
