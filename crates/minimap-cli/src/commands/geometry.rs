use anyhow::{bail, Result};
use clap::Args;
use serde::Serialize;

use minimap_core::geometry::{self, SliderGeometry};
use minimap_core::{AppConfig, ContainerMetrics, MinimapMetrics};

#[derive(Args, Debug, Clone)]
pub struct GeometryArgs {
    /// Current scroll offset of the content
    #[arg(long, default_value_t = 0.0)]
    pub scroll_top: f64,
    /// Total scrollable height of the content
    #[arg(long)]
    pub scroll_height: f64,
    /// Visible height of the content
    #[arg(long)]
    pub client_height: f64,
    /// Height of the minimap viewport
    #[arg(long)]
    pub map_height: f64,
    /// Height of the mini-content proxy
    #[arg(long)]
    pub mini_content_height: f64,
    /// Also resolve a click at this minimap-relative position
    #[arg(long)]
    pub click_y: Option<f64>,
    /// Override the configured minimum slider height
    #[arg(long)]
    pub min_slider_height: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct Teleport {
    pub click_y: f64,
    pub percent: f64,
    pub scroll_top: f64,
}

#[derive(Debug, Serialize)]
pub struct GeometryReport {
    pub container: ContainerMetrics,
    pub minimap: MinimapMetrics,
    pub min_slider_height: f64,
    /// `None` when the minimap is unmeasured
    pub geometry: Option<SliderGeometry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teleport: Option<Teleport>,
}

pub fn report(config: &AppConfig, args: &GeometryArgs) -> Result<GeometryReport> {
    let min_slider_height = args
        .min_slider_height
        .unwrap_or(config.minimap.min_slider_height);
    if !min_slider_height.is_finite() || min_slider_height < 0.0 {
        bail!("min slider height must be a non-negative number");
    }

    let container =
        ContainerMetrics::new(args.scroll_top, args.scroll_height, args.client_height).clamped();
    let minimap = MinimapMetrics::new(args.map_height, args.mini_content_height);
    let computed = geometry::compute(&container, &minimap, min_slider_height);

    let teleport = match (args.click_y, computed) {
        (Some(click_y), Some(g)) => {
            let percent = geometry::pointer_percent(click_y, &minimap, g.translate_y);
            let target = geometry::teleport_target(click_y, &container, &minimap, g.translate_y);
            percent.zip(target).map(|(percent, scroll_top)| Teleport {
                click_y,
                percent,
                scroll_top,
            })
        }
        _ => None,
    };

    Ok(GeometryReport {
        container,
        minimap,
        min_slider_height,
        geometry: computed,
        teleport,
    })
}

pub fn run(config: &AppConfig, args: &GeometryArgs) -> Result<()> {
    let report = report(config, args)?;
    if report.geometry.is_none() {
        tracing::warn!("minimap has zero size, no geometry produced");
    }
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use minimap_core::Regime;

    fn args() -> GeometryArgs {
        GeometryArgs {
            scroll_top: 1200.0,
            scroll_height: 3000.0,
            client_height: 600.0,
            map_height: 800.0,
            mini_content_height: 1500.0,
            click_y: Some(400.0),
            min_slider_height: None,
        }
    }

    #[test]
    fn test_reference_report() {
        let report = report(&AppConfig::default(), &args()).unwrap();
        let g = report.geometry.unwrap();
        assert_eq!(g.regime, Regime::Overflow);
        assert!((g.translate_y - 350.0).abs() < 1e-9);

        let teleport = report.teleport.unwrap();
        assert!((teleport.percent - 0.5).abs() < 1e-9);
        assert!((teleport.scroll_top - 1200.0).abs() < 1e-9);
    }

    #[test]
    fn test_report_serializes() {
        let report = report(&AppConfig::default(), &args()).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["geometry"]["regime"], "overflow");
        assert_eq!(json["min_slider_height"], 20.0);
    }

    #[test]
    fn test_unmeasured_minimap() {
        let mut a = args();
        a.map_height = 0.0;
        let report = report(&AppConfig::default(), &a).unwrap();
        assert!(report.geometry.is_none());
        assert!(report.teleport.is_none());

        let json = serde_json::to_value(&report).unwrap();
        assert!(json["geometry"].is_null());
        assert!(json.get("teleport").is_none());
    }

    #[test]
    fn test_rejects_negative_min_slider() {
        let mut a = args();
        a.min_slider_height = Some(-2.0);
        assert!(report(&AppConfig::default(), &a).is_err());
    }
}
