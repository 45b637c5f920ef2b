//! Plotly rendering of a running swarm.
//!
//! [`SwarmPlotter`] draws one contour frame per iteration and stitches them
//! into an animated HTML page when the search ends.

use crate::bounds::{SearchBounds, domain_from_bounds};
use crate::observer::{SwarmObserver, SwarmSnapshot};
use log::{info, warn};
use math_test_functions::{BoundedFunction2D, DomainError, linspace_grid};
use plotly::{
    Layout, Plot, Scatter,
    common::{ColorScale, ColorScalePalette, Marker, MarkerSymbol, Mode, Title},
    contour::Contour,
};
use std::error::Error;
use std::fs::{self, create_dir_all};
use std::path::{Path, PathBuf};

/// Renders swarm snapshots over a contour map of the cost function
pub struct SwarmPlotter {
    title: String,
    output_dir: PathBuf,
    x_vals: Vec<f64>,
    y_vals: Vec<f64>,
    z_vals: Vec<Vec<f64>>,
    known_minimum: Option<[f64; 2]>,
    width: usize,
    height: usize,
    write_final: bool,
    /// Plot JSON of every frame, in iteration order
    frames: Vec<String>,
    /// Last rendered plot, kept for `final.html`
    last_plot: Option<Plot>,
    written: Vec<PathBuf>,
    first_error: Option<Box<dyn Error>>,
}

impl SwarmPlotter {
    /// Evaluates `cost` on an `nx × ny` grid over `bounds` for the background.
    ///
    /// # Errors
    ///
    /// `DomainError` if `bounds` reach outside the cost function's domain.
    pub fn new<F>(
        cost: &F,
        bounds: &SearchBounds,
        output_dir: impl Into<PathBuf>,
        nx: usize,
        ny: usize,
    ) -> Result<Self, DomainError>
    where
        F: BoundedFunction2D + ?Sized,
    {
        let (xs, ys, gx, gy) = linspace_grid(&domain_from_bounds(bounds), nx, ny);
        let z = cost.evaluate_grid(gx.view(), gy.view())?;

        Ok(Self {
            title: cost.name().to_string(),
            output_dir: output_dir.into(),
            x_vals: xs.to_vec(),
            y_vals: ys.to_vec(),
            z_vals: z.outer_iter().map(|row| row.to_vec()).collect(),
            known_minimum: cost.global_minimum().map(|(p, _)| p),
            width: 800,
            height: 700,
            write_final: true,
            frames: Vec::new(),
            last_plot: None,
            written: Vec::new(),
            first_error: None,
        })
    }

    /// Sets the plot size in pixels
    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Whether to also write the last frame as `final.html`
    pub fn with_final_plot(mut self, enable: bool) -> Self {
        self.write_final = enable;
        self
    }

    /// Directory the plots are written to
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Number of frames rendered so far
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Builds the plot of one snapshot
    pub fn render(&self, snapshot: &SwarmSnapshot<'_>) -> Plot {
        let contour = Contour::new(
            self.x_vals.clone(),
            self.y_vals.clone(),
            self.z_vals.clone(),
        )
        .name(self.title.as_str())
        .color_scale(ColorScale::Palette(ColorScalePalette::Viridis))
        .color_bar(
            plotly::common::ColorBar::new()
                .len_mode(plotly::common::ThicknessMode::Pixels)
                .len(60 * self.height / 100)
                .y_anchor(plotly::common::Anchor::Bottom)
                .y(0.0),
        );

        let mut plot = Plot::new();
        plot.add_trace(contour);

        if let Some(min) = self.known_minimum {
            let minimum_trace = Scatter::new(vec![min[0]], vec![min[1]])
                .mode(Mode::Markers)
                .name("Global Minimum")
                .marker(
                    Marker::new()
                        .color("rgba(255, 255, 255, 1.0)")
                        .size(10)
                        .line(
                            plotly::common::Line::new()
                                .color("rgba(255, 0, 255, 1.0)")
                                .width(3.0),
                        )
                        .symbol(MarkerSymbol::Diamond),
                );
            plot.add_trace(minimum_trace);
        }

        let samples = snapshot.samples();
        let hover: Vec<String> = samples
            .iter()
            .map(|(_, _, v)| format!("f = {:.6e}", v))
            .collect();
        let particles_trace = Scatter::new(
            samples.iter().map(|s| s.0).collect(),
            samples.iter().map(|s| s.1).collect(),
        )
        .mode(Mode::Markers)
        .name("Particles")
        .hover_text_array(hover)
        .marker(
            Marker::new()
                .color("rgba(255, 255, 0, 0.9)")
                .size(8)
                .line(
                    plotly::common::Line::new()
                        .color("rgba(255, 140, 0, 1.0)")
                        .width(2.0),
                )
                .symbol(MarkerSymbol::Circle),
        );
        plot.add_trace(particles_trace);

        let best = snapshot.global_best_position;
        let best_trace = Scatter::new(vec![best[0]], vec![best[1]])
            .mode(Mode::Markers)
            .name("Best Solution")
            .hover_text_array(vec![format!("f = {:.6e}", snapshot.global_best_value)])
            .marker(
                Marker::new()
                    .color("rgba(255, 0, 0, 1.0)")
                    .size(12)
                    .line(
                        plotly::common::Line::new()
                            .color("rgba(255, 255, 255, 1.0)")
                            .width(3.0),
                    )
                    .symbol(MarkerSymbol::Star),
            );
        plot.add_trace(best_trace);

        let layout = Layout::new()
            .title(Title::with_text(format!(
                "{}: iteration {}, best {:.4e}",
                self.title, snapshot.iteration, snapshot.global_best_value
            )))
            .width(self.width)
            .height(self.height)
            .x_axis(plotly::layout::Axis::new().title(Title::with_text("X")))
            .y_axis(plotly::layout::Axis::new().title(Title::with_text("Y")));
        plot.set_layout(layout);
        plot
    }

    fn keep_error(&mut self, what: &str, e: Box<dyn Error>) {
        warn!("Failed to write {}: {}", what, e);
        if self.first_error.is_none() {
            self.first_error = Some(e);
        }
    }

    fn write_frame(&self, iteration: usize, json: &str) -> Result<PathBuf, Box<dyn Error>> {
        create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(format!("frame_{:04}.json", iteration));
        fs::write(&path, json)?;
        Ok(path)
    }

    fn write_animation(&self) -> Result<PathBuf, Box<dyn Error>> {
        create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join("animation.html");
        let html = animation_html(&self.title, &self.frames);
        fs::write(&path, html)?;
        Ok(path)
    }

    fn write_final_plot(&self, plot: &Plot) -> Result<PathBuf, Box<dyn Error>> {
        create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join("final.html");
        fs::write(&path, plot.to_html())?;
        Ok(path)
    }

    /// Paths written so far, or the first write failure
    pub fn finalize(&mut self) -> Result<Vec<PathBuf>, Box<dyn Error>> {
        if let Some(e) = self.first_error.take() {
            return Err(e);
        }
        Ok(self.written.clone())
    }
}

impl SwarmObserver for SwarmPlotter {
    fn on_iteration(&mut self, snapshot: &SwarmSnapshot<'_>) {
        let plot = self.render(snapshot);
        let json = plot.to_json();
        match self.write_frame(snapshot.iteration, &json) {
            Ok(path) => self.written.push(path),
            Err(e) => self.keep_error("frame", e),
        }
        self.frames.push(json);
        self.last_plot = Some(plot);
    }

    fn on_finish(&mut self) {
        if self.frames.is_empty() {
            return;
        }
        match self.write_animation() {
            Ok(path) => {
                info!("Swarm animation written to {}", path.display());
                self.written.push(path);
            }
            Err(e) => self.keep_error("animation", e),
        }
        if self.write_final
            && let Some(plot) = self.last_plot.take()
        {
            match self.write_final_plot(&plot) {
                Ok(path) => self.written.push(path),
                Err(e) => self.keep_error("final plot", e),
            }
        }
    }
}

/// Standalone page replaying `frames` with a slider and a play button
fn animation_html(title: &str, frames: &[String]) -> String {
    let frames_js = frames.join(",\n");
    let last = frames.len().saturating_sub(1);
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>Particle swarm: {title}</title>
    <script src="https://cdn.plot.ly/plotly-3.1.0.min.js"></script>
    <style>
        body {{
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            margin: 0;
            padding: 20px;
            background-color: #f5f5f5;
        }}
        .container {{
            max-width: 900px;
            margin: 0 auto;
            background-color: white;
            border-radius: 8px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.1);
            padding: 20px;
        }}
        .controls {{
            display: flex;
            align-items: center;
            gap: 12px;
            margin-top: 10px;
        }}
        .controls input[type=range] {{
            flex: 1;
        }}
        button {{
            padding: 8px 16px;
            border: none;
            background-color: #007bff;
            color: white;
            cursor: pointer;
            border-radius: 4px;
        }}
    </style>
</head>
<body>
    <div class="container">
        <div id="plot-display"></div>
        <div class="controls">
            <button id="play">Play</button>
            <input id="slider" type="range" min="0" max="{last}" value="0" step="1">
            <span id="label">iteration 0</span>
        </div>
    </div>

    <script>
        const frames = [
{frames_js}
        ];
        const slider = document.getElementById('slider');
        const label = document.getElementById('label');
        const play = document.getElementById('play');
        let timer = null;

        function show(i) {{
            const frame = frames[i];
            Plotly.react('plot-display', frame.data, frame.layout);
            slider.value = i;
            label.textContent = 'frame ' + i + ' / ' + (frames.length - 1);
        }}

        slider.addEventListener('input', () => show(parseInt(slider.value, 10)));

        play.addEventListener('click', () => {{
            if (timer !== null) {{
                clearInterval(timer);
                timer = null;
                play.textContent = 'Play';
                return;
            }}
            play.textContent = 'Pause';
            timer = setInterval(() => {{
                const next = (parseInt(slider.value, 10) + 1) % frames.length;
                show(next);
            }}, 400);
        }});

        if (frames.length > 0) {{
            show(0);
        }}
    </script>
</body>
</html>
"#,
        title = title,
        last = last,
        frames_js = frames_js
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::Bounds;
    use crate::particle::Particle;
    use math_test_functions::Rastrigin;

    fn temp_dir(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("pso_plot_{}_{}", tag, std::process::id()))
    }

    fn bounds() -> SearchBounds {
        [Bounds::new(-5.12, 5.12), Bounds::new(-5.12, 5.12)]
    }

    #[test]
    fn test_background_grid_shape() {
        let plotter = SwarmPlotter::new(&Rastrigin::default(), &bounds(), temp_dir("grid"), 30, 20)
            .unwrap();
        assert_eq!(plotter.x_vals.len(), 30);
        assert_eq!(plotter.y_vals.len(), 20);
        assert_eq!(plotter.z_vals.len(), 20);
        assert_eq!(plotter.z_vals[0].len(), 30);
        assert_eq!(plotter.known_minimum, Some([0.0, 0.0]));
    }

    #[test]
    fn test_bounds_outside_domain() {
        let wide = [Bounds::new(-6.0, 6.0), Bounds::new(-5.12, 5.12)];
        let err = SwarmPlotter::new(&Rastrigin::default(), &wide, temp_dir("wide"), 10, 10);
        assert!(err.is_err());
    }

    #[test]
    fn test_frames_and_animation() {
        let dir = temp_dir("frames");
        let _ = fs::remove_dir_all(&dir);
        let mut plotter =
            SwarmPlotter::new(&Rastrigin::default(), &bounds(), &dir, 20, 20).unwrap();

        let particles = vec![
            Particle::new([1.0, 1.0], [0.0, 0.0], 2.0),
            Particle::new([0.5, 1.0], [0.0, 0.0], 21.25),
        ];
        for it in 0..2 {
            plotter.on_iteration(&SwarmSnapshot {
                iteration: it,
                particles: &particles,
                global_best_value: 2.0,
                global_best_position: [1.0, 1.0],
            });
        }
        plotter.on_finish();
        assert_eq!(plotter.frame_count(), 2);

        let files = plotter.finalize().unwrap();
        assert!(files.contains(&dir.join("frame_0000.json")));
        assert!(files.contains(&dir.join("frame_0001.json")));
        assert!(files.contains(&dir.join("animation.html")));
        assert!(files.contains(&dir.join("final.html")));

        let frame: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.join("frame_0001.json")).unwrap())
                .unwrap();
        // contour, known minimum, particles, best
        assert_eq!(frame["data"].as_array().map(|d| d.len()), Some(4));

        let html = fs::read_to_string(dir.join("animation.html")).unwrap();
        assert!(html.contains("max=\"1\""));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_nothing_written_without_frames() {
        let dir = temp_dir("empty");
        let mut plotter =
            SwarmPlotter::new(&Rastrigin::default(), &bounds(), &dir, 5, 5).unwrap();
        plotter.on_finish();
        assert!(plotter.finalize().unwrap().is_empty());
    }
}
