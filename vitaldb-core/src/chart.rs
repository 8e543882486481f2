//! Geometry for the signal charts.
//!
//! Everything here is a pure function of a series of samples. Positions are
//! percentages of the plot area, with values mapped into the 5–75% band so
//! that a line never touches the edges; [`PlotArea`] turns them into absolute
//! coordinates.
use vitaldb_state::api::{DataPoint, TIME_COLUMN};

const BAND_OFFSET: f64 = 5.0;
const BAND_HEIGHT: f64 = 70.0;
const FLAT_BAR_HEIGHT: f64 = 50.0;

/// A position as percentages of the plot area, measured from the top left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartPoint {
    pub x: f64,
    pub y: f64,
}

/// The samples of `signal`, in order. Samples where the signal is absent or
/// not a finite number are `None`.
pub fn series(data: &[DataPoint], signal: &str) -> Vec<Option<f64>> {
    data.iter()
        .map(|point| point.get(signal).copied().flatten().filter(|v| v.is_finite()))
        .collect()
}

/// The timestamps of the first, middle and last samples, for axis labels.
pub fn time_axis(data: &[DataPoint]) -> [Option<f64>; 3] {
    let time_at = |idx: usize| {
        data.get(idx)
            .and_then(|point| point.get(TIME_COLUMN).copied().flatten())
    };
    [
        time_at(0),
        time_at(data.len() / 2),
        data.len().checked_sub(1).and_then(time_at),
    ]
}

/// The smallest and largest present value.
pub fn value_bounds(series: &[Option<f64>]) -> Option<(f64, f64)> {
    series.iter().flatten().fold(None, |bounds, &v| match bounds {
        None => Some((v, v)),
        Some((min, max)) => Some((f64::min(min, v), f64::max(max, v))),
    })
}

/// Bar heights as percentages. A flat series is drawn at half height; missing
/// samples have no bar.
pub fn bar_heights(series: &[Option<f64>]) -> Vec<Option<f64>> {
    let Some((min, max)) = value_bounds(series) else {
        return vec![None; series.len()];
    };
    series
        .iter()
        .map(|v| {
            v.map(|v| {
                if max == min {
                    FLAT_BAR_HEIGHT
                } else {
                    (v - min) / (max - min) * BAND_HEIGHT + BAND_OFFSET
                }
            })
        })
        .collect()
}

/// The line chart vertices. Larger values are higher up, so `y` shrinks as the
/// value grows. Missing samples are skipped but keep their slot on the x axis.
pub fn line_points(series: &[Option<f64>]) -> Vec<ChartPoint> {
    let Some((min, max)) = value_bounds(series) else {
        return vec![];
    };
    let range = if max - min == 0.0 { 1.0 } else { max - min };
    let last_idx = series.len().saturating_sub(1);

    series
        .iter()
        .enumerate()
        .filter_map(|(idx, v)| {
            let v = (*v)?;
            Some(ChartPoint {
                x: if last_idx == 0 {
                    0.0
                } else {
                    idx as f64 / last_idx as f64 * 100.0
                },
                y: (max - v) / range * BAND_HEIGHT + BAND_OFFSET,
            })
        })
        .collect()
}

/// An SVG path through [`line_points`], in percentage units.
pub fn line_path(series: &[Option<f64>]) -> String {
    path_string(line_points(series).into_iter())
}

/// The size of the surface a chart is drawn on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub width: f64,
    pub height: f64,
}
impl PlotArea {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn scale(&self, point: ChartPoint) -> ChartPoint {
        ChartPoint {
            x: point.x * self.width / 100.0,
            y: point.y * self.height / 100.0,
        }
    }

    /// Bar heights in this area's units.
    pub fn bar_heights(&self, series: &[Option<f64>]) -> Vec<Option<f64>> {
        bar_heights(series)
            .into_iter()
            .map(|h| h.map(|h| h * self.height / 100.0))
            .collect()
    }

    /// An SVG path through [`line_points`], in this area's units.
    pub fn line_path(&self, series: &[Option<f64>]) -> String {
        path_string(line_points(series).into_iter().map(|p| self.scale(p)))
    }
}

fn path_string(points: impl Iterator<Item = ChartPoint>) -> String {
    points
        .enumerate()
        .map(|(idx, p)| {
            let command = if idx == 0 { 'M' } else { 'L' };
            format!("{command} {} {}", coordinate(p.x), coordinate(p.y))
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Two decimal places, without trailing zeros.
fn coordinate(value: f64) -> String {
    let formatted = format!("{value:.2}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "" | "-" | "-0" => "0".to_string(),
        _ => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(time: f64, hr: Option<f64>) -> DataPoint {
        DataPoint::from([
            (TIME_COLUMN.to_string(), Some(time)),
            ("Solar8000/HR".to_string(), hr),
        ])
    }

    #[test]
    fn extracts_series_with_gaps() {
        let data = vec![point(0.0, Some(60.0)), point(1.0, None), point(2.0, Some(f64::NAN))];
        assert_eq!(series(&data, "Solar8000/HR"), vec![Some(60.0), None, None]);
        assert_eq!(series(&data, "BIS/BIS"), vec![None, None, None]);
        assert_eq!(time_axis(&data), [Some(0.0), Some(1.0), Some(2.0)]);
        assert_eq!(time_axis(&[]), [None, None, None]);
    }

    #[test]
    fn bars_fill_the_band() {
        let heights = bar_heights(&[Some(10.0), None, Some(20.0), Some(15.0)]);
        assert_eq!(heights, vec![Some(5.0), None, Some(75.0), Some(40.0)]);
    }

    #[test]
    fn flat_series_bars_are_half_height() {
        assert_eq!(bar_heights(&[Some(3.0), Some(3.0)]), vec![Some(50.0), Some(50.0)]);
        assert_eq!(bar_heights(&[None, None]), vec![None, None]);
    }

    #[test]
    fn line_puts_the_maximum_at_the_top() {
        let points = line_points(&[Some(10.0), Some(30.0), Some(20.0)]);
        assert_eq!(
            points,
            vec![
                ChartPoint { x: 0.0, y: 75.0 },
                ChartPoint { x: 50.0, y: 5.0 },
                ChartPoint { x: 100.0, y: 40.0 },
            ]
        );
    }

    #[test]
    fn line_path_skips_missing_samples() {
        assert_eq!(
            line_path(&[None, Some(1.0), None, Some(3.0), Some(2.0)]),
            "M 25 75 L 75 5 L 100 40"
        );
        assert_eq!(line_path(&[None, None]), "");
    }

    #[test]
    fn flat_and_single_point_lines() {
        assert_eq!(line_path(&[Some(7.0), Some(7.0)]), "M 0 5 L 100 5");
        assert_eq!(line_path(&[Some(7.0)]), "M 0 5");
    }

    #[test]
    fn plot_area_scales_percentages() {
        let area = PlotArea::new(200.0, 50.0);
        assert_eq!(
            area.line_path(&[Some(0.0), Some(3.0), Some(1.0)]),
            "M 0 37.5 L 100 2.5 L 200 25.83"
        );
        assert_eq!(
            area.bar_heights(&[Some(0.0), Some(1.0)]),
            vec![Some(2.5), Some(37.5)]
        );
    }
}
