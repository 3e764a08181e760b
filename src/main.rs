//! Sky Ascend headless driver
//!
//! Runs the simulation at a fixed 60 Hz with a small scripted autopilot and
//! no renderer attached. Useful for tuning and sanity-checking the core:
//! run with `RUST_LOG=info` to watch the session lifecycle.

use sky_ascend::sim::{Arena, Phase, Session};
use sky_ascend::{InputState, JsonFileStore};

const FRAME_DT: f32 = 1.0 / 60.0;
/// Two simulated minutes
const MAX_FRAMES: u32 = 60 * 120;

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(42);
    let store = JsonFileStore::in_dir(&std::env::temp_dir());
    let mut session = Session::new(Arena::default(), seed, Box::new(store));
    let mut input = InputState::new();

    log::info!("Sky Ascend headless run, seed {seed}");
    session.start();

    let mut frame = 0u32;
    while frame < MAX_FRAMES && session.phase != Phase::Over {
        drive(&session, &mut input, frame);
        session.tick(&mut input, FRAME_DT);
        frame += 1;
    }

    println!(
        "score {} best {} distance {:.0} after {} frames",
        session.score, session.best_score, session.distance, frame
    );
}

/// Steer toward the nearest solid platform above and jump on a short cadence
fn drive(session: &Session, input: &mut InputState, frame: u32) {
    let Some(player) = session.player.as_ref() else {
        return;
    };

    let target = session
        .platforms
        .iter()
        .filter(|p| p.is_solid() && p.top() < player.bottom())
        .min_by(|a, b| {
            let da = player.bottom() - a.top();
            let db = player.bottom() - b.top();
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        });

    if let Some(platform) = target {
        let platform_center = platform.left() + platform.width / 2.0;
        let player_center = player.left() + player.width / 2.0;
        input.left = platform_center < player_center - 6.0;
        input.right = platform_center > player_center + 6.0;
    } else {
        input.left = false;
        input.right = false;
    }

    // Hold the button for a few frames each cycle; the queue turns that into
    // one jump attempt per press
    input.set_jump(frame % 45 < 3);
}
