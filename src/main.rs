use clap::Parser;
use log::{error, info};
use macroquad::window::Conf;

use bezier_anim::config::{Cli, Settings};
use bezier_anim::seed_editor::SeedEditor;
use bezier_anim::viewer;

fn window_conf(count: usize) -> Conf {
    Conf {
        window_title: format!("Bezier Curve (order-{count})"),
        window_width: 1200,
        window_height: 800,
        high_dpi: true,
        sample_count: 4,
        ..Default::default()
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // 1. 解析并校验参数，失败时不打开窗口
    let cli = Cli::parse();
    let settings = Settings::from_cli(&cli)?;
    let seeds = settings.resolve_seeds()?;
    if let Some(points) = &seeds {
        info!("seed points: {points:?}");
    }

    // 2. 打开窗口；交互模式下先点选种子点，再运行动画
    macroquad::Window::from_config(window_conf(settings.count), async move {
        let seeds = match seeds {
            Some(points) => points,
            None => match SeedEditor::new(settings.count).run().await {
                Some(points) => {
                    info!("picked seed points: {points:?}");
                    points
                }
                None => {
                    info!("seed picking cancelled");
                    return;
                }
            },
        };

        if let Err(err) = viewer::run_animation(seeds, settings.animation).await {
            error!("animation stopped: {err}");
        }
    });
    Ok(())
}
