//! Headless host: drives the orchestrator over the in-memory twin stage.
//!
//! ```text
//! aerotwin [--options FILE.toml] [--script FILE.jsonl] [--unpaced]
//! ```
//!
//! A script holds one JSON object per line, either a request
//! (`{"op": "set_mode", "mode": "streamline"}`) or a frame step
//! (`{"advance": 120}`). Without a script a built-in demo runs.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::mpsc;

use aerotwin::inference::events::OrchestratorEvent;
use aerotwin::inference::loopback::LoopbackInference;
use aerotwin::scene::memory::InMemoryScene;
use aerotwin::state::{PartCategory, SliceAxis, VehicleId, VisualizationMode};
use aerotwin::util::frame_timing::FrameTiming;
use aerotwin::{Options, Orchestrator, OrchestratorError, Request};
use serde::Deserialize;

type Host = Orchestrator<InMemoryScene, LoopbackInference>;

/// One script line.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Step {
    Advance { advance: u32 },
    Request(Request),
}

#[derive(Default)]
struct Args {
    options: Option<PathBuf>,
    script: Option<PathBuf>,
    unpaced: bool,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args::default();
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--options" => {
                args.options =
                    Some(it.next().ok_or("--options needs a path")?.into());
            }
            "--script" => {
                args.script =
                    Some(it.next().ok_or("--script needs a path")?.into());
            }
            "--unpaced" => args.unpaced = true,
            other => return Err(format!("unknown argument {other}")),
        }
    }
    Ok(args)
}

fn load_script(path: &Path) -> Result<Vec<Step>, OrchestratorError> {
    let content = std::fs::read_to_string(path)?;
    content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(|l| {
            serde_json::from_str(l)
                .map_err(|e| OrchestratorError::RequestParse(format!("{l}: {e}")))
        })
        .collect()
}

fn demo_script() -> Vec<Step> {
    let r = Step::Request;
    vec![
        Step::Advance { advance: 540 },
        r(Request::SetMode {
            mode: VisualizationMode::Streamline,
        }),
        r(Request::SetStreamlineRadius { pct: 0.8 }),
        r(Request::SelectVehicle {
            vehicle: VehicleId::Truck,
        }),
        Step::Advance { advance: 60 },
        // Burst while the truck swap runs; only the sedan follows.
        r(Request::SelectVehicle {
            vehicle: VehicleId::Suv,
        }),
        r(Request::SelectVehicle {
            vehicle: VehicleId::Electric,
        }),
        r(Request::SelectVehicle {
            vehicle: VehicleId::Sedan,
        }),
        Step::Advance { advance: 1000 },
        r(Request::SetPartVariant {
            part: PartCategory::RideHeight,
            index: 2,
        }),
        r(Request::SetWindSpeed {
            speed: 110.0,
            point_scale: None,
        }),
        r(Request::SetMode {
            mode: VisualizationMode::IndexSlice,
        }),
        r(Request::SetSliceAxis { axis: SliceAxis::Z }),
        r(Request::SetSlicePosition { pct: -0.4 }),
        Step::Advance { advance: 30 },
        r(Request::Reset),
        Step::Advance { advance: 540 },
    ]
}

fn advance(
    host: &mut Host,
    timing: &mut FrameTiming,
    events: &mpsc::Receiver<OrchestratorEvent>,
    frames: u32,
) {
    for _ in 0..frames {
        timing.wait_for_frame();
        if let Err(e) = host.on_frame() {
            log::error!("frame {}: {e}", host.frame());
        }
        timing.end_frame();
        drain_events(events);
    }
}

fn drain_events(events: &mpsc::Receiver<OrchestratorEvent>) {
    for event in events.try_iter() {
        match serde_json::to_string(&event) {
            Ok(json) => log::info!("event {json}"),
            Err(e) => log::warn!("unencodable event: {e}"),
        }
    }
}

fn run(args: &Args) -> Result<(), OrchestratorError> {
    let options = match &args.options {
        Some(path) => Options::load(path)?,
        None => Options::default(),
    };
    let steps = match &args.script {
        Some(path) => load_script(path)?,
        None => demo_script(),
    };
    let target_fps = if args.unpaced {
        0
    } else {
        options.timing.target_fps
    };

    let mut host = Orchestrator::new(
        InMemoryScene::twin_stage().with_call_log_limit(0),
        LoopbackInference::new(),
        options,
    );
    let events = host.subscribe();
    let mut timing = FrameTiming::new(target_fps);

    host.initialize()?;
    drain_events(&events);
    for step in steps {
        match step {
            Step::Advance { advance: frames } => {
                advance(&mut host, &mut timing, &events, frames);
            }
            Step::Request(request) => {
                let _ = host.execute(request);
                drain_events(&events);
            }
        }
    }
    host.shutdown();

    log::info!(
        "final state {} after {} frames ({:.1} fps), {} inference requests",
        host.state_json()?,
        timing.frames(),
        timing.fps(),
        host.inference().requests().len()
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(msg) => {
            log::error!("{msg}");
            return ExitCode::FAILURE;
        }
    };
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
