//! Runs the delete button headlessly and writes the frames as PNGs.
//!
//! The icon font is expected at `assets/icon.ttf` (see `assets/README.md`);
//! point `CESTINO_ICON_FONT` somewhere else to override. Without a loadable
//! font the shell stays blank, which is exactly what the control does on a
//! device with a broken asset.
//!
//! Output lands in `target/frames` unless `CESTINO_OUT_DIR` says otherwise.

use cestino::prelude::*;

fn main() {
    let _ = env_logger::try_init();

    let font_path =
        std::env::var("CESTINO_ICON_FONT").unwrap_or_else(|_| "assets/icon.ttf".to_string());
    let out_dir = std::env::var("CESTINO_OUT_DIR").unwrap_or_else(|_| "target/frames".to_string());
    let sink = PngSink::new(&out_dir).expect("failed to create the output directory");

    let root = shell(&font_path);
    let status = root.status();

    // Drive time by frame count so the capture is reproducible, and tap the
    // button once the font has landed.
    let clock = ManualClock::new();
    let driver = clock.clone();
    let mut tapped = false;

    App::new()
        .width(360)
        .height(180)
        .background_color(Color::WHITE)
        .frames(200)
        .clock(clock)
        .sink(sink)
        .on_update(move |ctx| {
            driver.set(std::time::Duration::from_millis(ctx.frame * 16));

            if !tapped && status.get() == FontStatus::Ready {
                tapped = true;
                log::info!("tapping the button at frame {}", ctx.frame);
                ctx.events.push_back(Event::MouseDown {
                    x: 180.0,
                    y: 90.0,
                    button: MouseButton::Left,
                });
                ctx.events.push_back(Event::MouseUp {
                    x: 180.0,
                    y: 90.0,
                    button: MouseButton::Left,
                });
            }
        })
        .run(root);

    log::info!("frames written to {out_dir}");
}
