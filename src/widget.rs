//! The histogram widget.
//!
//! [`Histo`] owns a [`PointStore`] and a [`Surface`]. Every successful [`Histo::plot`] and
//! every [`Histo::change`] runs the full draw pipeline synchronously:
//!
//! 1. compute the [`Layout`] from the surface size and style padding,
//! 2. clear the surface,
//! 3. fill the origin marker,
//! 4. stroke the two axis lines,
//! 5. fill one bar per point, in insertion order.
//!
//! Bars start one bar-width right of the origin and are separated by one bar-width gaps.
//! Heights scale so the point with the largest magnitude spans the whole drawable height.

use crate::canvas::{Canvas, DisplayList, Surface};
use crate::color::Rgba;
use crate::error::Result;
use crate::framebuffer::Framebuffer;
use crate::geometry::{Line, Point, Rect};
use crate::notify::{Event, Notifier, SubscriptionId};
use crate::output::{PngEncoder, SvgEncoder};
use crate::store::{PointStore, Points};
use crate::style::HistoStyle;
use std::path::Path;
use std::time::{Duration, Instant};

/// Delay between [`Histo::show`] and the canvas becoming visible.
pub const SHOW_DELAY: Duration = Duration::from_millis(50);

/// Geometry derived from the surface size and padding. Recomputed on every draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    /// Logical surface width.
    pub width: f32,
    /// Logical surface height.
    pub height: f32,
    /// Padding on every side.
    pub padding: f32,
    /// Width left after padding.
    pub drawable_width: f32,
    /// Height left after padding.
    pub drawable_height: f32,
    /// Bottom-left corner of the drawable area.
    pub origin: Point,
}

impl Layout {
    /// Compute the layout for a surface of `width`×`height` logical pixels.
    #[must_use]
    pub fn compute(width: u32, height: u32, padding: f32) -> Self {
        let width = width as f32;
        let height = height as f32;
        let drawable_width = (width - 2.0 * padding).max(0.0);
        let drawable_height = (height - 2.0 * padding).max(0.0);
        Self {
            width,
            height,
            padding,
            drawable_width,
            drawable_height,
            origin: Point::new(padding, drawable_height + padding),
        }
    }

    /// The vertical and horizontal axis segments, both starting at the origin.
    #[must_use]
    pub fn axis(&self) -> [Line; 2] {
        let o = self.origin;
        [
            Line::new(o, Point::new(o.x, self.padding)),
            Line::new(o, Point::new(self.padding + self.drawable_width, o.y)),
        ]
    }

    /// Left edge of the bar at `index`.
    #[must_use]
    pub fn bar_x(&self, index: usize, bar_width: f32) -> f32 {
        bar_width + self.origin.x + index as f32 * (2.0 * bar_width)
    }

    /// Pixel height of a bar for `value` when the largest magnitude is `upper`.
    ///
    /// A zero `upper` (every value is zero) gives zero-height bars.
    #[must_use]
    pub fn bar_height(&self, value: f64, upper: f64) -> f32 {
        if upper <= 0.0 {
            return 0.0;
        }
        (f64::from(self.drawable_height) * (value.abs() / upper)) as f32
    }
}

/// One computed bar.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    /// Point label.
    pub label: String,
    /// Point value.
    pub value: f64,
    /// Rectangle anchored on the baseline with negative height (grows upward).
    pub rect: Rect,
    /// Fill color.
    pub color: Rgba,
}

/// Whether the widget holds any points yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetState {
    /// Surface ready, nothing plotted.
    Constructed,
    /// At least one point plotted.
    HasData,
}

/// A labelled-bar histogram drawn onto a [`Surface`].
///
/// # Example
///
/// ```
/// use histo::prelude::*;
///
/// let mut histo = Histo::new(Some("latency"), HistoStyle::default()).unwrap();
/// histo.plot(("p50", 12.0)).unwrap().plot([("p90", 30.0), ("p99", 48.0)]).unwrap();
///
/// assert_eq!(histo.upper(), Some(48.0));
/// assert_eq!(histo.bars().len(), 3);
/// ```
#[derive(Debug)]
pub struct Histo<S: Surface = Canvas> {
    name: Option<String>,
    style: HistoStyle,
    store: PointStore,
    surface: S,
    notifier: Notifier,
    shown_at: Option<Instant>,
    draws: u64,
}

impl Histo<Canvas> {
    /// Create a widget drawing onto a raster [`Canvas`].
    ///
    /// The canvas takes its logical size from `style.width`×`style.height`, then its
    /// backing store is scaled by `style.pixel_ratio`.
    ///
    /// # Errors
    ///
    /// Returns an error if the style describes a zero-sized canvas or an invalid pixel
    /// ratio.
    pub fn new(name: Option<&str>, style: HistoStyle) -> Result<Self> {
        let style = style.sanitized();
        let mut canvas = Canvas::new(style.width, style.height)?;
        canvas.set_line_width(style.axis_width);
        canvas.autoscale(style.pixel_ratio)?;
        Ok(Self::with_surface(name, style, canvas))
    }

    /// The frame a viewer sees at `now`: the canvas over the style background at the
    /// current fade-in opacity.
    ///
    /// # Errors
    ///
    /// Returns an error if compositing fails.
    pub fn frame_at(&self, now: Instant) -> Result<Framebuffer> {
        self.surface.composite(self.style.background, self.opacity_at(now))
    }

    /// Write the canvas backing store to a PNG file.
    ///
    /// # Errors
    ///
    /// Returns an error if file creation or PNG encoding fails.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        PngEncoder::write_to_file(self.surface.backing(), path)
    }

    /// The canvas as an SVG document with the raster embedded.
    ///
    /// # Errors
    ///
    /// Returns an error if PNG encoding fails.
    pub fn to_svg(&self) -> Result<SvgEncoder> {
        SvgEncoder::from_canvas(&self.surface)
    }
}

impl Histo<DisplayList> {
    /// Create a widget that records draw commands instead of rasterizing.
    #[must_use]
    pub fn recording(name: Option<&str>, style: HistoStyle) -> Self {
        let list = DisplayList::new(style.width, style.height);
        Self::with_surface(name, style, list)
    }

    /// The recorded drawing as vector SVG over the style background.
    #[must_use]
    pub fn to_svg(&self) -> SvgEncoder {
        SvgEncoder::from_display_list(&self.surface, self.style.axis_width)
            .background(Some(self.style.background))
    }
}

impl<S: Surface> Histo<S> {
    /// Create a widget drawing onto any surface.
    ///
    /// The surface's own size is used for layout; `style.width`/`style.height` only size
    /// surfaces built by [`Histo::new`]. Invalid lengths in `style` fall back to their
    /// defaults (see [`HistoStyle::sanitized`]).
    pub fn with_surface(name: Option<&str>, style: HistoStyle, surface: S) -> Self {
        Self {
            name: name.map(str::to_string),
            style: style.sanitized(),
            store: PointStore::new(),
            surface,
            notifier: Notifier::new(),
            shown_at: None,
            draws: 0,
        }
    }

    /// Merge points and redraw.
    ///
    /// Accepts anything convertible to [`Points`]: a `(label, value)` pair, a map, or a
    /// list of maps merged left-to-right. Emits [`Event::Plot`] after the redraw.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::EmptyPlot`] or [`crate::Error::NonFiniteValue`]; the widget
    /// is left untouched and nothing is drawn or emitted.
    pub fn plot(&mut self, points: impl Into<Points>) -> Result<&mut Self> {
        let applied = self.store.merge(points)?;
        tracing::debug!(
            name = self.name.as_deref().unwrap_or(""),
            applied,
            points = self.store.len(),
            upper = self.store.upper(),
            "plotted"
        );
        self.draw();
        self.notifier.emit(Event::Plot);
        Ok(self)
    }

    /// Plot a single labelled value.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NonFiniteValue`] if `value` is NaN or infinite.
    pub fn plot_pair(&mut self, label: impl Into<String>, value: f64) -> Result<&mut Self> {
        self.plot((label.into(), value))
    }

    /// Request a redraw from outside and emit [`Event::Change`].
    pub fn change(&mut self) -> &mut Self {
        self.draw();
        self.notifier.emit(Event::Change);
        self
    }

    /// Redraw everything from scratch.
    pub fn draw(&mut self) {
        let layout = self.layout();
        let style = &self.style;

        self.surface.clear();
        self.surface.fill_circle(layout.origin, style.origin_size, style.origin_color);
        self.surface.stroke_lines(&layout.axis(), style.axis_color);

        for bar in self.bars_in(&layout) {
            tracing::trace!(label = %bar.label, value = bar.value, x = bar.rect.x, height = -bar.rect.height, "bar");
            self.surface.fill_rect(bar.rect, bar.color);
        }

        self.draws += 1;
        tracing::debug!(
            draws = self.draws,
            bars = self.store.len(),
            drawable_width = layout.drawable_width,
            drawable_height = layout.drawable_height,
            "histogram drawn"
        );
    }

    /// Current layout for the surface size and style padding.
    #[must_use]
    pub fn layout(&self) -> Layout {
        Layout::compute(self.surface.width(), self.surface.height(), self.style.padding)
    }

    /// Bars the next draw will paint, in drawing order.
    #[must_use]
    pub fn bars(&self) -> Vec<Bar> {
        self.bars_in(&self.layout())
    }

    fn bars_in(&self, layout: &Layout) -> Vec<Bar> {
        let Some(upper) = self.store.upper() else {
            return Vec::new();
        };
        let bar_width = self.style.bar_width;

        self.store
            .iter()
            .enumerate()
            .map(|(index, (label, value))| Bar {
                label: label.to_string(),
                value,
                rect: Rect::new(
                    layout.bar_x(index, bar_width),
                    layout.origin.y,
                    bar_width,
                    -layout.bar_height(value, upper),
                ),
                color: self.style.bar_color_for(value),
            })
            .collect()
    }

    /// Schedule the fade-in and return the surface.
    ///
    /// The canvas becomes visible [`SHOW_DELAY`] later. Only the first call schedules;
    /// later calls return the surface unchanged.
    pub fn show(&mut self) -> &S {
        self.show_at(Instant::now())
    }

    /// [`Histo::show`] with an explicit clock reading.
    pub fn show_at(&mut self, now: Instant) -> &S {
        if self.shown_at.is_none() {
            self.shown_at = Some(now);
            tracing::debug!(delay_ms = SHOW_DELAY.as_millis() as u64, "show scheduled");
        }
        &self.surface
    }

    /// Whether the visible state has been applied by `now`.
    #[must_use]
    pub fn is_visible(&self, now: Instant) -> bool {
        self.shown_at
            .is_some_and(|at| now.saturating_duration_since(at) >= SHOW_DELAY)
    }

    /// Fade-in opacity at `now`: 0 until visible, then linear over `transition_ms`.
    #[must_use]
    pub fn opacity_at(&self, now: Instant) -> f32 {
        let Some(at) = self.shown_at else {
            return 0.0;
        };
        let elapsed = now.saturating_duration_since(at);
        let Some(into_transition) = elapsed.checked_sub(SHOW_DELAY) else {
            return 0.0;
        };
        if self.style.transition_ms == 0 {
            return 1.0;
        }
        let t = into_transition.as_secs_f32() / (self.style.transition_ms as f32 / 1000.0);
        t.clamp(0.0, 1.0)
    }

    /// Call `callback` whenever `event` is emitted.
    pub fn subscribe(
        &mut self,
        event: Event,
        callback: impl FnMut(Event) + 'static,
    ) -> SubscriptionId {
        self.notifier.subscribe(event, callback)
    }

    /// Remove a subscription. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    /// Display name given at construction.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The style this widget draws with.
    #[must_use]
    pub const fn style(&self) -> &HistoStyle {
        &self.style
    }

    /// Plotted points.
    #[must_use]
    pub const fn points(&self) -> &PointStore {
        &self.store
    }

    /// Largest absolute plotted value.
    #[must_use]
    pub const fn upper(&self) -> Option<f64> {
        self.store.upper()
    }

    /// The drawing surface.
    #[must_use]
    pub const fn surface(&self) -> &S {
        &self.surface
    }

    /// Number of completed draws.
    #[must_use]
    pub const fn draw_count(&self) -> u64 {
        self.draws
    }

    /// Lifecycle state.
    #[must_use]
    pub fn state(&self) -> WidgetState {
        if self.store.is_empty() {
            WidgetState::Constructed
        } else {
            WidgetState::HasData
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::DrawCommand;
    use crate::error::Error;
    use crate::style::ColorRule;
    use approx::assert_relative_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn style() -> HistoStyle {
        HistoStyle {
            width: 200,
            height: 140,
            padding: 20.0,
            bar_width: 8.0,
            ..HistoStyle::default()
        }
        .bar_colors(Rgba::GREEN, Rgba::RED)
    }

    #[test]
    fn test_layout_compute() {
        let layout = Layout::compute(200, 140, 20.0);
        assert_relative_eq!(layout.drawable_width, 160.0);
        assert_relative_eq!(layout.drawable_height, 100.0);
        assert_eq!(layout.origin, Point::new(20.0, 120.0));
    }

    #[test]
    fn test_layout_padding_larger_than_canvas() {
        let layout = Layout::compute(30, 30, 20.0);
        assert_relative_eq!(layout.drawable_width, 0.0);
        assert_relative_eq!(layout.drawable_height, 0.0);
        assert_eq!(layout.origin, Point::new(20.0, 20.0));
    }

    #[test]
    fn test_layout_axis_forms_an_l() {
        let [vertical, horizontal] = Layout::compute(200, 140, 20.0).axis();
        assert_eq!(vertical, Line::from_coords(20.0, 120.0, 20.0, 20.0));
        assert_eq!(horizontal, Line::from_coords(20.0, 120.0, 180.0, 120.0));
    }

    #[test]
    fn test_bar_height_zero_upper() {
        let layout = Layout::compute(100, 100, 10.0);
        assert_relative_eq!(layout.bar_height(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_bar_height_tiny_upper_stays_finite() {
        let layout = Layout::compute(100, 100, 10.0);
        let upper = f64::MIN_POSITIVE;
        assert_relative_eq!(layout.bar_height(upper, upper), 80.0);
        assert_relative_eq!(layout.bar_height(-upper / 2.0, upper), 40.0);
    }

    #[test]
    fn test_invalid_style_lengths_never_reach_surface() {
        let style = HistoStyle {
            padding: f32::NAN,
            bar_width: f32::INFINITY,
            origin_size: -1.0,
            axis_width: f32::NAN,
            ..style()
        };
        let mut histo = Histo::recording(None, style);
        histo.plot(("a", 10.0)).unwrap();

        let layout = histo.layout();
        assert_eq!(layout.origin, Point::new(20.0, 120.0));
        for bar in histo.bars() {
            assert!(bar.rect.x.is_finite() && bar.rect.width.is_finite());
            assert!(bar.rect.height.is_finite());
        }
    }

    #[test]
    fn test_huge_negative_padding_draws_without_panic() {
        let rules = crate::style::StyleRules::parse(".histo .gram { padding: -4000000000px }")
            .unwrap();
        let mut histo = Histo::new(None, HistoStyle::from_reader(&rules)).unwrap();
        histo.plot(("a", 10.0)).unwrap();
        assert_relative_eq!(histo.layout().padding, 20.0);
    }

    #[test]
    fn test_huge_lengths_rasterize_without_panic() {
        let style = HistoStyle {
            padding: 3.0e9,
            origin_size: 1.0e9,
            ..style()
        };
        let mut histo = Histo::new(None, style).unwrap();
        histo.plot([("a", 10.0), ("b", -4.0)]).unwrap();
        assert_eq!(histo.draw_count(), 1);
        assert_relative_eq!(histo.layout().drawable_height, 0.0);
    }

    #[test]
    fn test_new_widget_is_constructed() {
        let histo = Histo::new(Some("cpu"), style()).unwrap();
        assert_eq!(histo.name(), Some("cpu"));
        assert_eq!(histo.state(), WidgetState::Constructed);
        assert_eq!(histo.upper(), None);
        assert!(histo.bars().is_empty());
        assert_eq!(histo.draw_count(), 0);
    }

    #[test]
    fn test_new_rejects_zero_size() {
        let bad = HistoStyle {
            width: 0,
            ..HistoStyle::default()
        };
        assert!(matches!(
            Histo::new(None, bad),
            Err(Error::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_plot_scenario_positive_and_negative() {
        let mut histo = Histo::recording(None, style());
        histo.plot(("a", 10.0)).unwrap();
        histo.plot(("b", -4.0)).unwrap();

        assert_eq!(histo.upper(), Some(10.0));
        assert_eq!(histo.state(), WidgetState::HasData);

        let bars = histo.bars();
        assert_eq!(bars[0].label, "a");
        assert_eq!(bars[0].color, Rgba::GREEN);
        assert_relative_eq!(-bars[0].rect.height, 100.0);
        assert_eq!(bars[1].label, "b");
        assert_eq!(bars[1].color, Rgba::RED);
        assert_relative_eq!(-bars[1].rect.height, 40.0);
    }

    #[test]
    fn test_plot_overwrites_not_sums() {
        let mut histo = Histo::recording(None, style());
        histo.plot([("x", 3.0)]).unwrap();
        histo.plot([("x", 7.0), ("y", 2.0)]).unwrap();

        assert_eq!(histo.points().get("x"), Some(7.0));
        assert_eq!(histo.points().get("y"), Some(2.0));
        assert_eq!(histo.upper(), Some(7.0));
    }

    #[test]
    fn test_bar_positions() {
        let mut histo = Histo::recording(None, style());
        histo.plot([("a", 1.0), ("b", 2.0), ("c", 3.0)]).unwrap();

        let xs: Vec<f32> = histo.bars().iter().map(|b| b.rect.x).collect();
        // bar_width + origin.x + n * 2 * bar_width
        assert_eq!(xs, vec![28.0, 44.0, 60.0]);
        for bar in histo.bars() {
            assert_relative_eq!(bar.rect.y, 120.0);
            assert_relative_eq!(bar.rect.width, 8.0);
        }
    }

    #[test]
    fn test_draw_command_sequence() {
        let mut histo = Histo::recording(None, style());
        histo.plot(("a", 5.0)).unwrap();

        let commands = histo.surface().commands();
        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            DrawCommand::Circle { center, .. } if center == Point::new(20.0, 120.0)
        ));
        assert!(matches!(&commands[1], DrawCommand::Lines { lines, .. } if lines.len() == 2));
        assert!(matches!(commands[2], DrawCommand::Rect { color, .. } if color == Rgba::GREEN));
        assert_eq!(histo.surface().clears(), 1);
    }

    #[test]
    fn test_redraw_is_idempotent() {
        let mut histo = Histo::recording(None, style());
        histo.plot([("a", 5.0), ("b", -2.5)]).unwrap();
        let first = histo.surface().commands().to_vec();

        histo.draw();
        assert_eq!(histo.surface().commands(), first.as_slice());
        assert_eq!(histo.draw_count(), 2);
    }

    #[test]
    fn test_failed_plot_draws_and_emits_nothing() {
        let events = Rc::new(RefCell::new(0));
        let mut histo = Histo::recording(None, style());
        let e = Rc::clone(&events);
        histo.subscribe(Event::Plot, move |_| *e.borrow_mut() += 1);

        assert!(histo.plot(Points::new()).is_err());
        assert!(histo.plot_pair("nan", f64::NAN).is_err());

        assert_eq!(*events.borrow(), 0);
        assert_eq!(histo.draw_count(), 0);
        assert_eq!(histo.state(), WidgetState::Constructed);
    }

    #[test]
    fn test_events_fire_after_draw() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut histo = Histo::recording(None, style());

        let l = Rc::clone(&log);
        histo.subscribe(Event::Plot, move |e| l.borrow_mut().push(e));
        let l = Rc::clone(&log);
        let change_id = histo.subscribe(Event::Change, move |e| l.borrow_mut().push(e));

        histo.plot_pair("a", 1.0).unwrap().change();
        assert!(histo.unsubscribe(change_id));
        histo.change();

        assert_eq!(*log.borrow(), vec![Event::Plot, Event::Change]);
        assert_eq!(histo.draw_count(), 3);
    }

    #[test]
    fn test_change_without_points_draws_axis_only() {
        let mut histo = Histo::recording(None, style());
        histo.change();
        assert_eq!(histo.surface().commands().len(), 2);
    }

    #[test]
    fn test_color_rule_sign() {
        let mut histo = Histo::recording(None, style().color_rule(ColorRule::Sign));
        histo.plot([("frac", 2.5), ("neg", -1.0)]).unwrap();
        let bars = histo.bars();
        assert_eq!(bars[0].color, Rgba::GREEN);
        assert_eq!(bars[1].color, Rgba::RED);
    }

    #[test]
    fn test_default_rule_treats_fraction_as_alternate() {
        let mut histo = Histo::recording(None, style());
        histo.plot(("frac", 2.5)).unwrap();
        assert_eq!(histo.bars()[0].color, Rgba::RED);
    }

    #[test]
    fn test_canvas_pixels_after_plot() {
        let mut histo = Histo::new(None, style().pixel_ratio(2.0)).unwrap();
        histo.plot([("a", 10.0), ("b", -4.0)]).unwrap();

        let canvas = histo.surface();
        assert_eq!(canvas.backing().width(), 400);
        // Inside bar a (x 28..36, y 20..120) and bar b (x 44..52, y 80..120)
        assert_eq!(canvas.pixel_at(32.0, 30.0), Some(Rgba::GREEN));
        assert_eq!(canvas.pixel_at(48.0, 100.0), Some(Rgba::RED));
        // Above bar b stays empty
        assert_eq!(canvas.pixel_at(48.0, 70.0), Some(Rgba::TRANSPARENT));
        // Origin marker, beside the axis stroke
        assert_eq!(canvas.pixel_at(18.0, 121.0), Some(histo.style().origin_color));
    }

    #[test]
    fn test_show_schedules_once() {
        let mut histo = Histo::recording(None, style());
        let t0 = Instant::now();

        assert!(!histo.is_visible(t0));
        histo.show_at(t0);
        assert!(!histo.is_visible(t0 + Duration::from_millis(10)));
        assert!(histo.is_visible(t0 + SHOW_DELAY));

        histo.show_at(t0 + Duration::from_secs(5));
        assert!(histo.is_visible(t0 + SHOW_DELAY));
    }

    #[test]
    fn test_opacity_ramps_after_delay() {
        let mut histo = Histo::recording(
            None,
            HistoStyle {
                transition_ms: 100,
                ..style()
            },
        );
        let t0 = Instant::now();
        assert_relative_eq!(histo.opacity_at(t0), 0.0);

        histo.show_at(t0);
        assert_relative_eq!(histo.opacity_at(t0 + Duration::from_millis(40)), 0.0);
        assert_relative_eq!(
            histo.opacity_at(t0 + Duration::from_millis(100)),
            0.5,
            epsilon = 1e-4
        );
        assert_relative_eq!(histo.opacity_at(t0 + Duration::from_secs(1)), 1.0);
    }

    #[test]
    fn test_zero_transition_is_instant() {
        let mut histo = Histo::recording(
            None,
            HistoStyle {
                transition_ms: 0,
                ..style()
            },
        );
        let t0 = Instant::now();
        histo.show_at(t0);
        assert_relative_eq!(histo.opacity_at(t0 + SHOW_DELAY), 1.0);
    }

    #[test]
    fn test_recording_to_svg() {
        let mut histo = Histo::recording(None, style());
        histo.plot([("a", 10.0), ("b", -4.0)]).unwrap();

        let svg = histo.to_svg().render();
        assert_eq!(svg.matches("<rect x=").count(), 2);
        assert_eq!(svg.matches("<line").count(), 2);
        assert!(svg.contains(r#"height="40""#));
    }

    #[test]
    fn test_frame_at_fades_in() {
        let mut histo = Histo::new(None, style()).unwrap();
        histo.plot(("a", 1.0)).unwrap();
        let t0 = Instant::now();
        histo.show_at(t0);

        let hidden = histo.frame_at(t0).unwrap();
        assert_eq!(hidden.get_pixel(32, 30), Some(Rgba::WHITE));

        let shown = histo.frame_at(t0 + Duration::from_secs(2)).unwrap();
        assert_eq!(shown.get_pixel(32, 30), Some(Rgba::GREEN));
    }
}
