use std::io::Write;

use anyhow::Result;
use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};

use citypath_compute::RunStats;
use citypath_ingest::Region;

use crate::report::RouteReport;

/// Color scheme for terminal output.
struct Colors;

impl Colors {
    const HEADER: Color = Color::Magenta;
    const CITY: Color = Color::Cyan;
    const DISTANCE: Color = Color::Green;
    const UNREACHABLE: Color = Color::Red;
    const DIM: Color = Color::DarkGrey;
}

/// Distances print without a fractional part when they have none.
pub fn format_distance(distance: f64) -> String {
    if distance.is_infinite() {
        "Inf".to_string()
    } else if distance.fract() == 0.0 {
        format!("{:.0}", distance)
    } else {
        format!("{}", distance)
    }
}

pub fn render_path(path: &[String]) -> String {
    path.join(" -> ")
}

/// Plain-text distance matrix with one column per city, `Inf` for no road.
pub fn render_matrix(region: &Region) -> String {
    let n = region.city_count();
    let label_width = region.cities.iter().map(|c| c.len()).max().unwrap_or(0);

    let cells: Vec<Vec<String>> = (0..n)
        .map(|i| {
            (0..n)
                .map(|j| format_distance(region.matrix.weight(i, j)))
                .collect()
        })
        .collect();
    let widths: Vec<usize> = (0..n)
        .map(|j| {
            cells
                .iter()
                .map(|row| row[j].len())
                .chain(std::iter::once(region.cities[j].len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = format!("{:label_width$}", "");
    for (city, width) in region.cities.iter().zip(&widths) {
        out.push_str(&format!("  {:>width$}", city, width = width));
    }
    out.push('\n');
    for (city, row) in region.cities.iter().zip(&cells) {
        out.push_str(&format!("{:<label_width$}", city));
        for (cell, width) in row.iter().zip(&widths) {
            out.push_str(&format!("  {:>width$}", cell, width = width));
        }
        out.push('\n');
    }
    out
}

pub fn print_matrix(out: &mut impl Write, region: &Region) -> Result<()> {
    queue!(
        out,
        SetForegroundColor(Colors::HEADER),
        Print(format!("Road distances in {}:\n", region.name)),
        ResetColor,
        Print(render_matrix(region)),
    )?;
    out.flush()?;
    Ok(())
}

/// Print the minimum distance and route to every requested destination.
pub fn print_report(out: &mut impl Write, report: &RouteReport) -> Result<()> {
    queue!(
        out,
        SetForegroundColor(Colors::HEADER),
        Print(format!("Minimum distances from {} to:\n", report.start)),
        ResetColor,
    )?;

    for (i, dest) in report.destinations.iter().enumerate() {
        queue!(
            out,
            Print(format!("\t{}. ", i + 1)),
            SetForegroundColor(Colors::CITY),
            Print(&dest.city),
            ResetColor,
            Print(" = "),
        )?;
        match (&dest.distance, &dest.path) {
            (Some(distance), Some(path)) => queue!(
                out,
                SetForegroundColor(Colors::DISTANCE),
                Print(format_distance(*distance)),
                ResetColor,
                Print(format!("\n\tPath: {}\n", render_path(path))),
            )?,
            _ => queue!(
                out,
                SetForegroundColor(Colors::UNREACHABLE),
                Print("unreachable\n"),
                ResetColor,
            )?,
        }
    }

    print_stats(out, &report.stats)?;
    out.flush()?;
    Ok(())
}

fn print_stats(out: &mut impl Write, stats: &RunStats) -> Result<()> {
    queue!(
        out,
        SetForegroundColor(Colors::DIM),
        Print(format!(
            "({} cities, {} workers, {} rounds, {} settled, {:.2?})\n",
            stats.nodes, stats.workers, stats.rounds, stats.settled, stats.elapsed
        )),
        ResetColor,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use citypath_ingest::parse_region;

    #[test]
    fn distance_formatting() {
        assert_eq!(format_distance(42.0), "42");
        assert_eq!(format_distance(29.5), "29.5");
        assert_eq!(format_distance(f64::INFINITY), "Inf");
    }

    #[test]
    fn path_joins_with_arrows() {
        let path = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        assert_eq!(render_path(&path), "A -> B -> C");
        assert_eq!(render_path(&path[..1]), "A");
    }

    #[test]
    fn matrix_aligns_columns() {
        let region = parse_region(
            "t",
            "x,Alpha,B\nAlpha,0,1250\nB,-1,0\n".as_bytes(),
        )
        .unwrap();
        let text = render_matrix(&region);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "       Alpha     B");
        assert_eq!(lines[1], "Alpha      0  1250");
        assert_eq!(lines[2], "B        Inf     0");
    }
}
