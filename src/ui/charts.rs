use std::collections::BTreeMap;
use std::f64::consts::{FRAC_PI_2, TAU};
use std::ops::RangeInclusive;

use eframe::egui::{Align2, Color32, Stroke, Ui};
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, GridMark, Legend, Line, Plot, PlotPoint, PlotPoints,
    Points, Polygon, Text,
};

use crate::data::model::{AirportRecord, Region};
use crate::state::AppState;

const CHART_HEIGHT: f32 = 320.0;

/// Mid-latitude of New England; one degree of longitude is about cos(43°)
/// of a degree of latitude there.
const MAP_ASPECT: f32 = 0.73;

/// Axis labels for charts whose x coordinate is `Region::index`.
fn region_axis_label(mark: GridMark, _range: &RangeInclusive<f64>) -> String {
    let rounded = mark.value.round();
    if (mark.value - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    Region::ALL
        .get(rounded as usize)
        .map(|r| r.name().to_string())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Map
// ---------------------------------------------------------------------------

/// Hover text of one map point.
#[derive(Debug, Clone, PartialEq)]
struct MapLabel {
    lon: f64,
    lat: f64,
    text: String,
}

impl MapLabel {
    fn new(record: &AirportRecord) -> Self {
        let mut text = record.name.clone();
        if let Some(town) = &record.municipality {
            text.push_str(&format!("\nMunicipality: {town}"));
        }
        if !record.ident.is_empty() {
            text.push_str(&format!("\nIdent: {}", record.ident));
        }
        MapLabel {
            lon: record.longitude_deg,
            lat: record.latitude_deg,
            text,
        }
    }
}

/// Text of the airport nearest to `at`. Longitude is scaled by the map
/// aspect so distance matches what is on screen.
fn nearest_label<'a>(labels: &'a [MapLabel], at: &PlotPoint) -> Option<&'a str> {
    let dist = |l: &MapLabel| {
        let dx = (l.lon - at.x) * MAP_ASPECT as f64;
        let dy = l.lat - at.y;
        dx * dx + dy * dy
    };
    labels
        .iter()
        .min_by(|a, b| dist(a).total_cmp(&dist(b)))
        .map(|l| l.text.as_str())
}

/// Airport locations, one point series per state. Hovering names the
/// nearest airport with its municipality and ident.
pub fn airport_map(ui: &mut Ui, state: &AppState) {
    let Some(visible) = state.visible_records() else {
        return;
    };

    let mut by_region: BTreeMap<Region, Vec<[f64; 2]>> = BTreeMap::new();
    for record in visible.iter() {
        by_region
            .entry(record.region)
            .or_default()
            .push([record.longitude_deg, record.latitude_deg]);
    }
    let labels: Vec<MapLabel> = visible.iter().map(MapLabel::new).collect();

    Plot::new("airport_map")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .data_aspect(MAP_ASPECT)
        .label_formatter(move |_series, at| {
            nearest_label(&labels, at).unwrap_or_default().to_string()
        })
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (region, points) in by_region {
                plot_ui.points(
                    Points::new(points)
                        .name(region.name())
                        .color(state.colors.color_for(region))
                        .radius(3.0),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Bar chart
// ---------------------------------------------------------------------------

/// Mean elevation per state. States without any known elevation get no bar.
pub fn elevation_bar_chart(ui: &mut Ui, state: &AppState) {
    let means = &state.view.mean_elevation;

    Plot::new("elevation_bars")
        .height(CHART_HEIGHT)
        .x_axis_formatter(region_axis_label)
        .x_axis_label("State")
        .y_axis_label("Average Elevation (ft)")
        .include_y(0.0)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (&region, &mean) in means {
                let x = region.index() as f64;
                let color = state.colors.color_for(region);
                let bar = Bar::new(x, mean).name(region.name()).fill(color).width(0.6);
                plot_ui.bar_chart(BarChart::new(vec![bar]).name(region.name()).color(color));
                plot_ui.text(
                    Text::new(PlotPoint::new(x, mean), format!("{mean:.0}"))
                        .anchor(Align2::CENTER_BOTTOM),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Radar chart
// ---------------------------------------------------------------------------

/// Vertex of a radar polygon: spoke `i` of `n`, starting at 12 o'clock and
/// running clockwise, at radius `r` in [0, 1].
fn radar_point(i: usize, n: usize, r: f64) -> [f64; 2] {
    let angle = FRAC_PI_2 - TAU * i as f64 / n as f64;
    [r * angle.cos(), r * angle.sin()]
}

/// Count and mean elevation per state. Each series is scaled to its own
/// maximum so both stay readable; the legend names carry the maxima.
pub fn radar_chart(ui: &mut Ui, state: &AppState) {
    let summaries = &state.view.region_summaries;
    let n = summaries.len();

    let max_count = summaries.iter().map(|s| s.count).max().unwrap_or(0);
    let max_mean = summaries
        .iter()
        .filter_map(|s| s.mean_elevation)
        .fold(0.0_f64, f64::max);

    let count_shape: Vec<[f64; 2]> = summaries
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let r = if max_count > 0 {
                s.count as f64 / max_count as f64
            } else {
                0.0
            };
            radar_point(i, n, r)
        })
        .collect();
    let mean_shape: Vec<[f64; 2]> = summaries
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let r = match s.mean_elevation {
                Some(m) if max_mean > 0.0 => m / max_mean,
                _ => 0.0,
            };
            radar_point(i, n, r)
        })
        .collect();

    Plot::new("region_radar")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .include_x(-1.3)
        .include_x(1.3)
        .include_y(-1.2)
        .include_y(1.2)
        .show(ui, |plot_ui| {
            if n == 0 {
                return;
            }
            let grid = Color32::from_gray(90);

            for ring in [0.25, 0.5, 0.75, 1.0] {
                let circle: PlotPoints = (0..=n).map(|i| radar_point(i % n, n, ring)).collect();
                plot_ui.line(Line::new(circle).color(grid).width(0.5));
            }
            for (i, s) in summaries.iter().enumerate() {
                let spoke = vec![[0.0, 0.0], radar_point(i, n, 1.0)];
                plot_ui.line(Line::new(spoke).color(grid).width(0.5));
                let [x, y] = radar_point(i, n, 1.12);
                plot_ui.text(Text::new(PlotPoint::new(x, y), s.region.name()).color(Color32::GRAY));
            }

            let count_color = Color32::from_rgb(99, 110, 250);
            let mean_color = Color32::from_rgb(239, 85, 59);
            plot_ui.polygon(
                Polygon::new(PlotPoints::new(count_shape))
                    .name(format!("Count (max {max_count})"))
                    .fill_color(count_color.linear_multiply(0.25))
                    .stroke(Stroke::new(2.0, count_color)),
            );
            plot_ui.polygon(
                Polygon::new(PlotPoints::new(mean_shape))
                    .name(format!("Avg Elevation (max {max_mean:.0} ft)"))
                    .fill_color(mean_color.linear_multiply(0.25))
                    .stroke(Stroke::new(2.0, mean_color)),
            );
        });
}

// ---------------------------------------------------------------------------
// Box plot
// ---------------------------------------------------------------------------

/// Spread horizontal offsets for the overlaid points so they do not stack
/// on one vertical line. Deterministic so the chart does not flicker.
fn jitter(j: usize) -> f64 {
    ((j as f64 * 0.618_034).fract() - 0.5) * 0.3
}

/// Elevation distribution per state with every airport drawn as a point.
pub fn elevation_box_plot(ui: &mut Ui, state: &AppState) {
    let spreads = &state.view.spreads;

    Plot::new("elevation_box")
        .height(CHART_HEIGHT)
        .x_axis_formatter(region_axis_label)
        .x_axis_label("State")
        .y_axis_label("Elevation (ft)")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (&region, spread) in spreads {
                let x = region.index() as f64;
                let color = state.colors.color_for(region);

                let elem = BoxElem::new(
                    x,
                    BoxSpread::new(
                        spread.lower_whisker,
                        spread.q1,
                        spread.median,
                        spread.q3,
                        spread.upper_whisker,
                    ),
                )
                .name(region.name())
                .box_width(0.5)
                .whisker_width(0.3)
                .fill(color.linear_multiply(0.3))
                .stroke(Stroke::new(1.5, color));
                plot_ui.box_plot(BoxPlot::new(vec![elem]).name(region.name()));

                let points: Vec<[f64; 2]> = spread
                    .values
                    .iter()
                    .enumerate()
                    .map(|(j, &e)| [x + jitter(j), e])
                    .collect();
                plot_ui.points(Points::new(points).color(color).radius(1.5));
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radar_first_spoke_points_up() {
        let [x, y] = radar_point(0, 6, 1.0);
        assert!(x.abs() < 1e-12);
        assert!((y - 1.0).abs() < 1e-12);

        let [x, _] = radar_point(1, 4, 0.5);
        assert!((x - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_map_hover_names_nearest_airport() {
        use crate::data::model::tests::airport;
        use crate::data::model::Category;

        let mut logan = airport(1, Region::Massachusetts, Category::Large, Some(20.0));
        logan.name = "Logan".to_string();
        logan.ident = "KBOS".to_string();
        logan.municipality = Some("Boston".to_string());
        logan.latitude_deg = 42.36;
        logan.longitude_deg = -71.0;

        let mut field = airport(2, Region::Vermont, Category::Small, None);
        field.name = "Hill Field".to_string();
        field.ident = String::new();
        field.municipality = None;
        field.latitude_deg = 44.5;
        field.longitude_deg = -73.1;

        let labels = vec![MapLabel::new(&logan), MapLabel::new(&field)];
        assert_eq!(
            nearest_label(&labels, &PlotPoint::new(-71.1, 42.4)),
            Some("Logan\nMunicipality: Boston\nIdent: KBOS")
        );
        assert_eq!(nearest_label(&labels, &PlotPoint::new(-73.0, 44.4)), Some("Hill Field"));
        assert_eq!(nearest_label(&[], &PlotPoint::new(0.0, 0.0)), None);
    }

    #[test]
    fn test_jitter_stays_inside_box() {
        for j in 0..500 {
            assert!(jitter(j).abs() <= 0.15);
        }
    }
}
