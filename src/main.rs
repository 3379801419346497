use lane_detector::config::load_config;
use lane_detector::image::io::{load_rgb_image, save_mask, write_json_file};
use lane_detector::image::FrameRgb8;
use lane_detector::{LaneDetector, LaneParams};
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();
    match std::env::args().nth(1) {
        Some(config_path) => run_from_config(&config_path),
        None => run_synthetic_demo(),
    }
}

fn run_from_config(config_path: &str) -> ExitCode {
    let config = match load_config(config_path.as_ref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    let frame_buf = match load_rgb_image(&config.input_path) {
        Ok(buf) => buf,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    let mut detector = match LaneDetector::new(config.lane_params) {
        Ok(det) => det,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    let lane = match detector.process(&frame_buf.as_view()) {
        Ok(lane) => lane,
        Err(err) => {
            eprintln!("no lane detected: {err}");
            return ExitCode::FAILURE;
        }
    };
    report(&lane);
    if let Some(path) = &config.output.mask_out {
        if let Err(err) = save_mask(&lane.rectified_mask, path) {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    }
    if let Some(path) = &config.output.json_out {
        if let Err(err) = write_json_file(path, &lane) {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}

fn run_synthetic_demo() -> ExitCode {
    // Paints lane lines along the default perspective source trapezoid, so
    // the rectified bands land near x=300 and x=980.
    let (w, h) = (1280usize, 720usize);
    let rgb = synthetic_road(w, h);
    let frame = FrameRgb8 {
        w,
        h,
        stride: 3 * w,
        data: &rgb,
    };

    let mut detector = match LaneDetector::new(LaneParams::default()) {
        Ok(det) => det,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    match detector.process(&frame) {
        Ok(lane) => {
            report(&lane);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("no lane detected: {err}");
            ExitCode::FAILURE
        }
    }
}

fn report(lane: &lane_detector::LaneFrame) {
    let mean_radius = (lane.curvature.left_radius_m + lane.curvature.right_radius_m) / 2.0;
    println!("Curve radius [m]: {mean_radius:.2}");
    println!("Center offset [m]: {:.2}", lane.offset_m);
}

fn synthetic_road(w: usize, h: usize) -> Vec<u8> {
    let mut rgb = vec![40u8; w * h * 3]; // dark asphalt
    let edges = [((190.0, 720.0), (596.0, 447.0)), ((1125.0, 720.0), (685.0, 447.0))];
    for ((x0, y0), (x1, y1)) in edges {
        let (y_top, y_bot) = (y1 as usize, y0 as usize);
        for y in y_top..y_bot.min(h) {
            let t = (y as f64 - y0) / (y1 - y0);
            let cx = (x0 + t * (x1 - x0)).round() as i64;
            for x in (cx - 8).max(0)..(cx + 8).min(w as i64) {
                let i = (y * w + x as usize) * 3;
                rgb[i] = 255;
                rgb[i + 1] = 255;
                rgb[i + 2] = 255;
            }
        }
    }
    rgb
}
