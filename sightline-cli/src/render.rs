//! SVG rendering for scenes and solutions.

use std::fmt::{self, Write};

use sightline_core::{
    coverage::{CoverageProblem, Placement},
    Achievability, Category, Footprint, Point, Scene, Segment,
};

/// SVG rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Canvas width in pixels
    pub width: f64,
    /// Canvas height in pixels
    pub height: f64,
    /// Padding around the scene (fraction of its extent)
    pub padding: f64,
    /// Stroke width for outlines
    pub stroke_width: f64,
    /// Whether to label entities with their ids
    pub show_labels: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 800.0,
            padding: 0.05,
            stroke_width: 1.0,
            show_labels: true,
        }
    }
}

fn color(category: Category) -> &'static str {
    match category {
        Category::Observer => "#377eb8", // blue
        Category::Target => "#4daf4a",   // green
        Category::Obstacle => "#555555", // gray
    }
}

const RAY_COLOR: &str = "#e41a1c";
const GUARD_COLOR: &str = "#000000";

/// Bounding box accumulator
#[derive(Debug, Clone, Copy)]
struct Bounds {
    min: Point,
    max: Point,
}

impl Bounds {
    fn new() -> Self {
        Bounds {
            min: Point::new(f64::INFINITY, f64::INFINITY),
            max: Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    fn add(&mut self, p: &Point) {
        self.min = Point::new(self.min.x.min(p.x), self.min.y.min(p.y));
        self.max = Point::new(self.max.x.max(p.x), self.max.y.max(p.y));
    }

    /// `(min_x, min_y, width, height)` with padding; degenerate boxes become unit-sized.
    fn view_box(&self, padding: f64) -> (f64, f64, f64, f64) {
        let (mut min, mut max) = (self.min, self.max);
        if min.x > max.x {
            min.x = -1.0;
            max.x = 1.0;
        }
        if min.y > max.y {
            min.y = -1.0;
            max.y = 1.0;
        }
        let width = (max.x - min.x).max(1.0);
        let height = (max.y - min.y).max(1.0);
        let (pad_x, pad_y) = (width * padding, height * padding);
        (min.x - pad_x, min.y - pad_y, width + 2.0 * pad_x, height + 2.0 * pad_y)
    }
}

fn header(svg: &mut String, bounds: &Bounds, config: &RenderConfig) -> fmt::Result {
    let (x, y, w, h) = bounds.view_box(config.padding);
    writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="{} {} {} {}">"#,
        config.width, config.height, x, y, w, h
    )?;
    writeln!(svg, r#"  <rect x="{}" y="{}" width="{}" height="{}" fill="white"/>"#, x, y, w, h)
}

fn line(svg: &mut String, s: &Segment, stroke: &str, width: f64, dashed: bool) -> fmt::Result {
    let dash = if dashed { r#" stroke-dasharray="1 1""# } else { "" };
    writeln!(
        svg,
        r#"  <line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"{}/>"#,
        s.p1.x, s.p1.y, s.p2.x, s.p2.y, stroke, width, dash
    )
}

fn dot(svg: &mut String, p: &Point, r: f64, fill: &str) -> fmt::Result {
    writeln!(svg, r#"  <circle cx="{}" cy="{}" r="{}" fill="{}"/>"#, p.x, p.y, r, fill)
}

fn label(
    svg: &mut String,
    p: &Point,
    size: f64,
    fill: &str,
    text: impl fmt::Display,
) -> fmt::Result {
    writeln!(
        svg,
        r#"  <text x="{}" y="{}" font-size="{}" text-anchor="middle" fill="{}">{}</text>"#,
        p.x, p.y, size, fill, text
    )
}

/// Render entities and the rays that achieved targets.
pub fn render_scene(
    scene: &Scene,
    achievability: Option<&Achievability>,
    config: &RenderConfig,
) -> Result<String, fmt::Error> {
    let mut bounds = Bounds::new();
    for entity in scene.entities() {
        for v in entity.polygon().vertices() {
            bounds.add(&v);
        }
    }
    let rays: &[Segment] = achievability.map(|a| a.rays.as_slice()).unwrap_or_default();
    for ray in rays {
        bounds.add(&ray.p1);
        bounds.add(&ray.p2);
    }

    let mut svg = String::new();
    header(&mut svg, &bounds, config)?;

    for entity in scene.entities() {
        let stroke = color(entity.category());
        let a = &entity.anchor;
        match (&entity.footprint, entity.category()) {
            // Observers are points; their footprint is only nominal
            (_, Category::Observer) => dot(&mut svg, a, config.stroke_width * 2.0, stroke)?,
            (Footprint::Rect { width, height }, _) => writeln!(
                svg,
                r#"  <rect x="{}" y="{}" width="{}" height="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
                a.x, a.y, width, height, stroke, config.stroke_width
            )?,
            (Footprint::Circle { radius }, _) => writeln!(
                svg,
                r#"  <circle cx="{}" cy="{}" r="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
                a.x, a.y, radius, stroke, config.stroke_width
            )?,
        }
        if config.show_labels {
            label(&mut svg, a, config.stroke_width * 8.0, stroke, entity.id)?;
        }
    }

    for ray in rays {
        line(&mut svg, ray, RAY_COLOR, config.stroke_width, true)?;
    }

    writeln!(svg, "</svg>")?;
    Ok(svg)
}

/// Render guard walls, obstacles, target points, and the chosen camera positions.
pub fn render_coverage(
    problem: &CoverageProblem,
    placement: Option<&Placement>,
    config: &RenderConfig,
) -> Result<String, fmt::Error> {
    let mut bounds = Bounds::new();
    for s in problem.guards.iter().chain(problem.obstacles.iter()) {
        bounds.add(&s.p1);
        bounds.add(&s.p2);
    }
    for t in &problem.targets {
        bounds.add(&t.point);
    }

    let mut svg = String::new();
    header(&mut svg, &bounds, config)?;

    for guard in &problem.guards {
        line(&mut svg, guard, GUARD_COLOR, config.stroke_width * 2.0, false)?;
    }
    for obstacle in &problem.obstacles {
        line(&mut svg, obstacle, color(Category::Obstacle), config.stroke_width * 2.0, false)?;
    }
    let radius = config.stroke_width * 4.0;
    for t in &problem.targets {
        dot(&mut svg, &t.point, radius, color(Category::Target))?;
        if config.show_labels {
            label(&mut svg, &t.point, radius * 3.0, color(Category::Target), t.id)?;
        }
    }

    if let Some(placement) = placement {
        for (sample, subset) in [
            (&placement.first, &placement.first_subset),
            (&placement.second, &placement.second_subset),
        ] {
            for t in problem.targets.iter().filter(|t| subset.contains(&t.id)) {
                let sight = Segment::new(sample.point, t.point);
                line(&mut svg, &sight, RAY_COLOR, config.stroke_width, true)?;
            }
            dot(&mut svg, &sample.point, radius, RAY_COLOR)?;
        }
    }

    writeln!(svg, "</svg>")?;
    Ok(svg)
}
