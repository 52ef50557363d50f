use std::ops::Range;

use plotters::coord::ranged1d::{DefaultFormatting, KeyPointHint, Ranged};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::debug;

use crate::models::{ChartSpec, SeriesKind};
use crate::utils::{DashboardError, Result};

/// Share of each category slot taken up by its bars
const BAR_GROUP_WIDTH: f64 = 0.8;

/// Canvas size and the text shown in place of an empty chart
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
    pub empty_label: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            width: 900,
            height: 450,
            empty_label: "No data".to_string(),
        }
    }
}

/// Linear axis whose grid lines and labels sit exactly on the given points
struct FixedTicks {
    start: f64,
    end: f64,
    points: Vec<f64>,
}

impl Ranged for FixedTicks {
    type FormatOption = DefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        let ratio = (value - self.start) / (self.end - self.start);
        limit.0 + (ratio * f64::from(limit.1 - limit.0)).round() as i32
    }

    fn key_points<Hint: KeyPointHint>(&self, hint: Hint) -> Vec<f64> {
        // only bold lines; light lines would repeat the same points
        if hint.weight().allow_light_points() {
            Vec::new()
        } else {
            self.points.clone()
        }
    }

    fn range(&self) -> Range<f64> {
        self.start..self.end
    }
}

fn render_err<E: std::fmt::Display>(e: E) -> DashboardError {
    DashboardError::Render(e.to_string())
}

/// Parse a `#rrggbb` color
pub fn parse_hex_color(color: &str) -> Result<RGBColor> {
    let hex = color
        .strip_prefix('#')
        .filter(|h| h.len() == 6 && h.chars().all(|c| c.is_ascii_hexdigit()))
        .ok_or_else(|| DashboardError::InvalidArgument(format!("'{}' is not a #rrggbb color", color)))?;

    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16)
            .map_err(|e| DashboardError::InvalidArgument(format!("bad color '{}': {}", color, e)))
    };
    Ok(RGBColor(channel(0)?, channel(2)?, channel(4)?))
}

/// Render a chart as an SVG document
pub fn render_svg(spec: &ChartSpec, options: &RenderOptions) -> Result<String> {
    check_size(options)?;
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (options.width, options.height)).into_drawing_area();
        draw_chart(&root, spec, options)?;
    }
    debug!("Rendered '{}' as SVG ({} bytes)", spec.title, svg.len());
    Ok(svg)
}

fn check_size(options: &RenderOptions) -> Result<()> {
    if options.width == 0 || options.height == 0 {
        return Err(DashboardError::InvalidArgument(format!(
            "chart size must be positive, got {}x{}",
            options.width, options.height
        )));
    }
    Ok(())
}

fn draw_chart<DB>(root: &DrawingArea<DB, Shift>, spec: &ChartSpec, options: &RenderOptions) -> Result<()>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE).map_err(render_err)?;

    if spec.is_empty() {
        let area = root
            .titled(&spec.title, ("sans-serif", 24).into_font())
            .map_err(render_err)?;
        let (w, h) = area.dim_in_pixel();
        let style = ("sans-serif", 20)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center));
        area.draw(&Text::new(options.empty_label.clone(), (w as i32 / 2, h as i32 / 2), style))
            .map_err(render_err)?;
        root.present().map_err(render_err)?;
        return Ok(());
    }

    let colors = spec
        .series
        .iter()
        .map(|s| parse_hex_color(&s.color))
        .collect::<Result<Vec<_>>>()?;

    let n = spec.x_labels.len();
    let x_range = FixedTicks {
        start: -0.5,
        end: n as f64 - 0.5,
        points: (0..n).map(|i| i as f64).collect(),
    };
    let y_top = if spec.y_max() > 0.0 { spec.y_max() } else { 1.0 };
    let y_range = FixedTicks {
        start: 0.0,
        end: y_top,
        points: spec.tick_values.clone(),
    };

    let mut chart = ChartBuilder::on(root)
        .caption(&spec.title, ("sans-serif", 24).into_font())
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .build_cartesian_2d(x_range, y_range)
        .map_err(render_err)?;

    let x_label = |v: &f64| {
        let index = v.round();
        if index < 0.0 {
            return String::new();
        }
        spec.x_labels.get(index as usize).cloned().unwrap_or_default()
    };
    let y_label = |v: &f64| {
        spec.tick_values
            .iter()
            .position(|t| (t - v).abs() <= 1e-9 * t.abs().max(1.0))
            .and_then(|i| spec.tick_labels.get(i).cloned())
            .unwrap_or_default()
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(&spec.x_axis_title)
        .y_desc(&spec.y_axis_title)
        .x_labels(n)
        .y_labels(spec.tick_values.len())
        .x_label_formatter(&x_label)
        .y_label_formatter(&y_label)
        .draw()
        .map_err(render_err)?;

    let bar_count = spec.series.iter().filter(|s| s.kind == SeriesKind::Bar).count();
    let bar_width = BAR_GROUP_WIDTH / bar_count.max(1) as f64;
    let mut bar_slot = 0;

    for (series, color) in spec.series.iter().zip(colors) {
        match series.kind {
            SeriesKind::Bar => {
                let offset = -BAR_GROUP_WIDTH / 2.0 + bar_slot as f64 * bar_width;
                bar_slot += 1;
                chart
                    .draw_series(series.values.iter().enumerate().map(move |(i, v)| {
                        let x0 = i as f64 + offset;
                        Rectangle::new([(x0, 0.0), (x0 + bar_width, *v)], color.filled())
                    }))
                    .map_err(render_err)?
                    .label(series.name.as_str())
                    .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
            }
            SeriesKind::Line => {
                let points: Vec<(f64, f64)> = series
                    .values
                    .iter()
                    .enumerate()
                    .map(|(i, v)| (i as f64, *v))
                    .collect();
                chart
                    .draw_series(LineSeries::new(points.clone(), color.stroke_width(2)))
                    .map_err(render_err)?
                    .label(series.name.as_str())
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
                chart
                    .draw_series(points.into_iter().map(|p| Circle::new(p, 3, color.filled())))
                    .map_err(render_err)?;
            }
        }
    }

    if spec.series.len() > 1 {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(render_err)?;
    }

    root.present().map_err(render_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Series;
    use crate::services::chart_service::ChartConfigurator;

    fn sample_spec() -> ChartSpec {
        ChartConfigurator::default()
            .build_chart_spec(
                "Top partners",
                "Country",
                "Value",
                vec!["China".to_string(), "USA".to_string()],
                vec![
                    Series::bar("Export", vec![200e9, 150e9], "#1f4e9c"),
                    Series::line("Import", vec![120e9, 90e9], "#ff7f0e"),
                ],
                50e9,
            )
            .unwrap()
    }

    #[test]
    fn test_parse_hex_color() {
        let color = parse_hex_color("#1f77b4").unwrap();
        assert_eq!((color.0, color.1, color.2), (0x1f, 0x77, 0xb4));
        assert!(parse_hex_color("blue").is_err());
        assert!(parse_hex_color("#12345g").is_err());
        assert!(parse_hex_color("#1234").is_err());
    }

    #[test]
    fn test_render_svg_contains_labels() {
        let svg = render_svg(&sample_spec(), &RenderOptions::default()).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Top partners"));
        assert!(svg.contains(">150 Bn<"));
        assert!(svg.contains(">China<"));
    }

    #[test]
    fn test_render_svg_labels_every_tick_and_category() {
        let spec = ChartConfigurator::default()
            .build_chart_spec(
                "Odd step",
                "Country",
                "Value",
                vec!["China".to_string(), "USA".to_string(), "Polen".to_string()],
                vec![Series::bar("Export", vec![200e9, 150e9, 96e9], "#0000ff")],
                30e9,
            )
            .unwrap();
        assert_eq!(spec.tick_labels.last().map(String::as_str), Some("210 Bn"));

        let svg = render_svg(&spec, &RenderOptions::default()).unwrap();
        for label in spec.tick_labels.iter().chain(spec.x_labels.iter()) {
            assert!(svg.contains(&format!(">{}<", label)), "missing label {}", label);
        }
    }

    #[test]
    fn test_fixed_ticks_map_and_key_points() {
        let axis = FixedTicks {
            start: 0.0,
            end: 90.0,
            points: vec![0.0, 30.0, 60.0, 90.0],
        };
        assert_eq!(axis.map(&0.0, (400, 100)), 400);
        assert_eq!(axis.map(&30.0, (400, 100)), 300);
        assert_eq!(axis.map(&90.0, (400, 100)), 100);
        assert_eq!(axis.key_points(plotters::coord::ranged1d::BoldPoints(2)), vec![0.0, 30.0, 60.0, 90.0]);
        assert!(axis.key_points(plotters::coord::ranged1d::LightPoints::new(4, 40)).is_empty());
    }

    #[test]
    fn test_render_svg_empty_chart_shows_notice() {
        let spec = ChartConfigurator::default()
            .build_chart_spec("Nothing here", "x", "y", Vec::new(), Vec::new(), 50e9)
            .unwrap();
        let options = RenderOptions {
            empty_label: "Keine Daten".to_string(),
            ..RenderOptions::default()
        };
        let svg = render_svg(&spec, &options).unwrap();
        assert!(svg.contains("Keine Daten"));
    }

    #[test]
    fn test_render_rejects_bad_color() {
        let mut spec = sample_spec();
        spec.series[0].color = "orange".to_string();
        assert!(matches!(
            render_svg(&spec, &RenderOptions::default()),
            Err(DashboardError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_render_rejects_zero_size() {
        let options = RenderOptions {
            width: 0,
            ..RenderOptions::default()
        };
        assert!(render_svg(&sample_spec(), &options).is_err());
    }
}
