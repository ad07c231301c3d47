//! Text artifacts describing a finished search.
//!
//! Three files are written, one line per node, tiles space-separated in
//! column-major order:
//! - `Nodes.txt`: every dequeued board, in dequeue order
//! - `NodesInfo.txt`: `<index>\t<parent_index>\t<tiles>` per dequeued node
//! - `nodePath.txt`: the solution path from start to goal (empty if unsolvable)

use std::fs::File;
use std::io::Write;
use std::path::Path;

use log::debug;

use crate::solver::SearchReport;

pub const NODES_TXT: &str = "Nodes.txt";
pub const NODES_INFO_TXT: &str = "NodesInfo.txt";
pub const NODE_PATH_TXT: &str = "nodePath.txt";

/// Writes all three artifacts into `dir`.
pub fn save(report: &SearchReport, dir: &Path) -> std::io::Result<()> {
    write_file(&dir.join(NODES_TXT), &render_explored(report))?;
    write_file(&dir.join(NODES_INFO_TXT), &render_node_info(report))?;
    write_file(&dir.join(NODE_PATH_TXT), &render_path(report))?;
    Ok(())
}

fn write_file(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(contents.as_bytes())?;
    debug!("Wrote {} ({} bytes)", path.display(), contents.len());
    Ok(())
}

/// One line per dequeued board.
pub fn render_explored(report: &SearchReport) -> String {
    let mut output = String::new();
    for node in report.explored() {
        output.push_str(&node.board.to_line());
        output.push('\n');
    }
    output
}

/// One `<index>\t<parent_index>\t<tiles>` line per dequeued node.
pub fn render_node_info(report: &SearchReport) -> String {
    let mut output = String::new();
    for node in report.explored() {
        output.push_str(&format!(
            "{}\t{}\t{}\n",
            node.index,
            node.parent_index,
            node.board.to_line()
        ));
    }
    output
}

/// One line per board on the solution path, start first.
pub fn render_path(report: &SearchReport) -> String {
    let mut output = String::new();
    for board in report.path_boards().unwrap_or_default() {
        output.push_str(&board.to_line());
        output.push('\n');
    }
    output
}
