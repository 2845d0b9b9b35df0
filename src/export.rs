//! Calculation export: CSV report and chart series.
//!
//! The report mirrors the "computation details" sheet of the desktop app:
//!
//! ```text
//! Cognitive modeling
//! Graph matrix      labelled influence matrix
//! Impulse vector    Q1= (initial impulses), P1= (same, start of the process)
//! Values            one row per step
//! Matrices          A, A^2, ... A^steps
//! ```
//!
//! Any spreadsheet opens it. Plotting front ends use [`chart_series`].

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::model::{Matrix, Node};
use crate::simulation::CalculationResult;
use crate::{Error, Result};

/// Write `result` as a CSV report.
///
/// Fails with [`Error::Shape`] for a result without any step.
pub fn write_report(result: &CalculationResult, writer: &mut dyn Write) -> Result<()> {
    let (Some(influence), Some(initial)) = (result.influence(), result.impulses.first()) else {
        return Err(Error::Shape("calculation result has no steps".into()));
    };

    writeln!(writer, "Cognitive modeling")?;
    writeln!(writer)?;
    writeln!(writer)?;

    writeln!(writer, "Graph matrix")?;
    write_matrix(writer, &result.nodes, influence)?;
    writeln!(writer)?;

    writeln!(writer, "Impulse vector")?;
    write_row(writer, "Q1=", initial)?;
    write_row(writer, "P1=", initial)?;
    writeln!(writer)?;

    writeln!(writer, "Values")?;
    write_header(writer, "Step", &result.nodes)?;
    for (step, values) in result.values.iter().enumerate() {
        write_row(writer, &step.to_string(), values)?;
    }
    writeln!(writer)?;

    writeln!(writer, "Matrices")?;
    for (i, matrix) in result.matrices.iter().enumerate() {
        if i == 0 {
            writeln!(writer, "A")?;
        } else {
            writeln!(writer, "A^{}", i + 1)?;
        }
        write_matrix(writer, &result.nodes, matrix)?;
        writeln!(writer)?;
    }

    Ok(())
}

fn write_matrix(writer: &mut dyn Write, nodes: &[Node], matrix: &Matrix) -> Result<()> {
    write_header(writer, "", nodes)?;
    for (node, row) in nodes.iter().zip(matrix.iter_rows()) {
        write_row(writer, &node.label, row)?;
    }
    Ok(())
}

fn write_header(writer: &mut dyn Write, corner: &str, nodes: &[Node]) -> Result<()> {
    let mut cells = vec![csv_field(corner)];
    cells.extend(nodes.iter().map(|n| csv_field(&n.label)));
    writeln!(writer, "{}", cells.join(","))?;
    Ok(())
}

fn write_row(writer: &mut dyn Write, head: &str, values: &[f64]) -> Result<()> {
    let mut cells = vec![csv_field(head)];
    cells.extend(values.iter().map(f64::to_string));
    writeln!(writer, "{}", cells.join(","))?;
    Ok(())
}

/// Quote a CSV cell when it contains a separator, quote or line break.
fn csv_field(s: &str) -> String {
    if s.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

// ============================================================================
// Chart series
// ============================================================================

/// One plotted value: node `group` has value `y` at step `x`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub x: usize,
    pub y: f64,
    pub group: usize,
}

/// Legend entry for one node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartGroup {
    pub id: usize,
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub points: Vec<ChartPoint>,
    pub groups: Vec<ChartGroup>,
}

/// Value trajectories of every node, grouped by node index.
pub fn chart_series(result: &CalculationResult) -> ChartSeries {
    let points = result
        .values
        .iter()
        .enumerate()
        .flat_map(|(x, step)| {
            step.iter().enumerate().map(move |(group, &y)| ChartPoint { x, y, group })
        })
        .collect();
    let groups = result
        .nodes
        .iter()
        .enumerate()
        .map(|(id, node)| ChartGroup { id, content: node.label.clone() })
        .collect();
    ChartSeries { points, groups }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn result() -> CalculationResult {
        let a = Matrix::from_rows(vec![vec![0.0, 0.5], vec![0.0, 0.0]]).unwrap();
        CalculationResult {
            values: vec![vec![10.0, 5.0], vec![11.0, 4.0]],
            impulses: vec![vec![1.0, -1.0], vec![0.0, 0.5]],
            matrices: vec![a, Matrix::square(2)],
            nodes: vec![Node::new(1, "Demand"), Node::new(2, "Price, retail")],
        }
    }

    #[test]
    fn test_csv_field() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_report_layout() {
        let mut buf = Vec::new();
        write_report(&result(), &mut buf).unwrap();
        let report = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[0], "Cognitive modeling");
        assert_eq!(lines[3], "Graph matrix");
        assert_eq!(lines[4], ",Demand,\"Price, retail\"");
        assert_eq!(lines[5], "Demand,0,0.5");
        assert_eq!(lines[6], "\"Price, retail\",0,0");
        assert_eq!(lines[9], "Q1=,1,-1");
        assert_eq!(lines[10], "P1=,1,-1");
        assert!(report.contains("Step,Demand,\"Price, retail\"\n0,10,5\n1,11,4\n"));
        assert!(report.contains("\nA\n"));
        assert!(report.contains("\nA^2\n"));
        assert!(!report.contains("A^3"));
    }

    #[test]
    fn test_report_rejects_empty_result() {
        let empty = CalculationResult {
            values: vec![],
            impulses: vec![],
            matrices: vec![],
            nodes: vec![],
        };
        let mut buf = Vec::new();
        assert!(matches!(write_report(&empty, &mut buf), Err(Error::Shape(_))));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_chart_series() {
        let series = chart_series(&result());
        assert_eq!(series.points.len(), 4);
        assert_eq!(series.points[3], ChartPoint { x: 1, y: 4.0, group: 1 });
        assert_eq!(series.groups[0], ChartGroup { id: 0, content: "Demand".into() });
    }
}
