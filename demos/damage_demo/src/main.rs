// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simulated draw loop that exercises damage tracking and diagnostics.
//!
//! Builds a small widget tree on a double-buffered headless screen, then runs
//! 60 event-loop iterations at a simulated 60 Hz. A sprite moves every frame,
//! a worker thread toggles a panel through a [`LoopProxy`], and every draw
//! pass is traced to both a
//! [`PrettyPrintSink`](vellum_debug::pretty::PrettyPrintSink) and a
//! [`RecorderSink`](vellum_debug::recorder::RecorderSink). The recording is
//! written to `damage_demo.jsonl` and the final widget tree to
//! `damage_demo_tree.json`. Each presented frame is announced on a
//! [`Signal`], whose slots gather the summary printed at the end.
//!
//! Set `VELLUM_GREENSCREEN=1` to see repeated-damage outlines reported.

use std::cell::Cell;
use std::fs::File;
use std::io::BufWriter;
use std::rc::Rc;
use std::thread;

use vellum_core::geometry::{Rect, Size};
use vellum_core::time::{Duration, HostTime};
use vellum_core::trace::{
    DamageEvent, DrawBeginEvent, DrawEndEvent, FlipEvent, FlipSkippedEvent, GreenscreenEvent,
    TraceSink, Tracer,
};
use vellum_debug::pretty::PrettyPrintSink;
use vellum_debug::recorder::RecorderSink;
use vellum_render::{Color, Headless, PixelFormat, Screen, ScreenConfig};
use vellum_widget::{
    EventLoop, LoopProxy, Signal, SolidFill, WidgetId, WidgetStore, draw_traced,
};

const FRAME_COUNT: u64 = 60;
const FRAME_INTERVAL: Duration = Duration(16_666_667);
const SCREEN: Size = Size::new(320, 240);
const SPRITE: i32 = 24;

/// Forwards every event to two sinks.
struct Tee<A, B>(A, B);

impl<A: TraceSink, B: TraceSink> TraceSink for Tee<A, B> {
    fn on_damage(&mut self, e: &DamageEvent) {
        self.0.on_damage(e);
        self.1.on_damage(e);
    }

    fn on_draw_begin(&mut self, e: &DrawBeginEvent) {
        self.0.on_draw_begin(e);
        self.1.on_draw_begin(e);
    }

    fn on_draw_end(&mut self, e: &DrawEndEvent) {
        self.0.on_draw_end(e);
        self.1.on_draw_end(e);
    }

    fn on_flip(&mut self, e: &FlipEvent) {
        self.0.on_flip(e);
        self.1.on_flip(e);
    }

    fn on_copy_rects(&mut self, flip_index: u64, rects: &[Rect]) {
        self.0.on_copy_rects(flip_index, rects);
        self.1.on_copy_rects(flip_index, rects);
    }

    fn on_flip_skipped(&mut self, e: &FlipSkippedEvent) {
        self.0.on_flip_skipped(e);
        self.1.on_flip_skipped(e);
    }

    fn on_greenscreen(&mut self, e: &GreenscreenEvent) {
        self.0.on_greenscreen(e);
        self.1.on_greenscreen(e);
    }
}

/// What one draw pass put on screen.
struct Presented {
    buffer: usize,
    copied_area: u64,
}

struct App {
    store: WidgetStore,
    screen: Screen<Headless>,
    root: WidgetId,
    sprite: WidgetId,
    panel: WidgetId,
    velocity: (i32, i32),
    sink: Tee<PrettyPrintSink, RecorderSink>,
    presented: Signal<Presented>,
}

impl App {
    fn new() -> Self {
        let config = ScreenConfig::new(SCREEN)
            .with_format(PixelFormat::Rgb565)
            .with_buffers(2)
            .apply_env();
        let screen = Screen::new(&config, Headless::new(usize::from(config.buffer_count)));

        let mut store = WidgetStore::new();
        let root = store.create_frame(Rect::new(0, 0, SCREEN.width, SCREEN.height));
        store.set_background(root, Some(Color::rgb(0x20, 0x20, 0x28)));

        let panel = store.create_frame(Rect::new(200, 20, 100, 200));
        store.set_background(panel, Some(Color::rgb(0x40, 0x40, 0x50)));
        for row in 0..4 {
            let button = store.create_widget(
                Rect::new(210, 30 + row * 48, 80, 40),
                SolidFill::new(Color::rgb(0x60, 0x90, 0xc0)).with_border(Color::WHITE),
            );
            store.add_child(panel, button);
        }
        store.add_child(root, panel);

        let sprite = store.create_widget(
            Rect::new(10, 10, SPRITE, SPRITE),
            SolidFill::new(Color::rgb(0xe0, 0x40, 0x40)),
        );
        store.add_child(root, sprite);

        Self {
            store,
            screen,
            root,
            sprite,
            panel,
            velocity: (5, 3),
            sink: Tee(
                PrettyPrintSink::with_writer(Box::new(std::io::stdout())),
                RecorderSink::new(),
            ),
            presented: Signal::new(),
        }
    }

    /// Bounces the sprite inside the area left of the panel.
    fn step_sprite(&mut self) {
        let b = self.store.widget_box(self.sprite);
        let area = Rect::new(0, 0, 190, SCREEN.height);
        let (mut dx, mut dy) = self.velocity;
        if b.x + dx < area.x || b.right() + dx > area.right() {
            dx = -dx;
        }
        if b.y + dy < area.y || b.bottom() + dy > area.bottom() {
            dy = -dy;
        }
        self.velocity = (dx, dy);
        self.store.set_box(self.sprite, b.translate(dx, dy));
    }

    fn draw(&mut self) {
        let drew = draw_traced(
            &mut self.store,
            self.root,
            &mut self.screen,
            &mut Tracer::new(&mut self.sink),
        );
        if !drew {
            return;
        }
        if let Some(record) = self.screen.backend().presented().last() {
            self.presented.emit(&Presented {
                buffer: record.index,
                copied_area: record.copied.iter().map(Rect::area).sum(),
            });
        }
    }
}

fn spawn_panel_toggler(proxy: LoopProxy<App>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        for _ in 0..2 {
            let posted = proxy.post(|app: &mut App| {
                let visible = app.store.is_visible(app.panel);
                app.store.set_visible(app.panel, !visible);
            });
            if posted.is_err() {
                return;
            }
        }
    })
}

fn main() {
    let mut app = App::new();
    let mut ev = EventLoop::<App>::new();

    let frames = Rc::new(Cell::new(0_u64));
    let copied = Rc::new(Cell::new(0_u64));
    let per_buffer = Rc::new(Cell::new([0_u64; 2]));
    {
        let (frames, copied) = (frames.clone(), copied.clone());
        app.presented.connect(move |p| {
            frames.set(frames.get() + 1);
            copied.set(copied.get() + p.copied_area);
        });
    }
    {
        let per_buffer = per_buffer.clone();
        app.presented.connect(move |p| {
            let mut counts = per_buffer.get();
            if let Some(n) = counts.get_mut(p.buffer) {
                *n += 1;
            }
            per_buffer.set(counts);
        });
    }

    let start = HostTime(1_000_000_000);
    ev.add_periodic(start, FRAME_INTERVAL, App::step_sprite);
    // Draw half a frame after the animation step.
    ev.add_periodic(
        start + Duration(FRAME_INTERVAL.nanos() / 2),
        FRAME_INTERVAL,
        App::draw,
    );

    let worker = spawn_panel_toggler(ev.proxy());
    if worker.join().is_err() {
        eprintln!("panel toggler panicked");
    }

    let mut now = start;
    for _ in 0..FRAME_COUNT {
        ev.run_once(now, &mut app);
        now += Duration(FRAME_INTERVAL.nanos() / 2);
        ev.run_once(now, &mut app);
        now += Duration(FRAME_INTERVAL.nanos() - FRAME_INTERVAL.nanos() / 2);
    }

    let Tee(_, recorder) = &app.sink;
    let (frames, copied) = (frames.get(), copied.get());
    let full = Rect::new(0, 0, SCREEN.width, SCREEN.height).area() * frames;
    let [front, back] = per_buffer.get();
    println!(
        "\n{frames} flips ({front} to buffer 0, {back} to buffer 1), {copied} px copied \
         ({:.1}% of full-screen redraws), {} trace events",
        100.0 * copied as f64 / full.max(1) as f64,
        recorder.len(),
    );

    match File::create("damage_demo.jsonl") {
        Ok(file) => {
            if let Err(err) = recorder.write_json_lines(&mut BufWriter::new(file)) {
                eprintln!("failed to write damage_demo.jsonl: {err}");
            } else {
                println!("wrote damage_demo.jsonl");
            }
        }
        Err(err) => eprintln!("failed to create damage_demo.jsonl: {err}"),
    }

    match File::create("damage_demo_tree.json") {
        Ok(file) => {
            let mut out = BufWriter::new(file);
            if let Err(err) = vellum_debug::tree::write_pretty(&app.store, app.root, &mut out) {
                eprintln!("failed to write damage_demo_tree.json: {err}");
            } else {
                println!("wrote damage_demo_tree.json");
            }
        }
        Err(err) => eprintln!("failed to create damage_demo_tree.json: {err}"),
    }
}
