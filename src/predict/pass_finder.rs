use chrono::{DateTime, Utc};
use log::debug;

use crate::orbit::{Observer, OrbitModel, Topocentric};
use crate::predict::types::{PassEdge, PassWindow, SearchConfig};
use crate::predict::PredictError;

/// Scan mode of the search loop. `Coarse` walks forward in big steps looking
/// for a threshold crossing; `Refining` walks backward in fine steps to
/// localize the crossing it just stepped over.
enum Scan {
    Coarse,
    Refining { rising: bool, remaining: u32 },
}

/// Find the next rise/set pair after `start`.
///
/// Elevation is a nonlinear function of time with no closed-form inverse, so
/// this is a two-phase numeric search: coarse forward sampling detects a sign
/// change of `elevation - min_elevation`, then backward fine stepping pins
/// the crossing down to within one fine step. The scan resumes from the
/// coarse detection point until both edges are found or the horizon runs out.
///
/// A never-rising target comes back with `rise = None, ever_up = false`; a
/// circumpolar one with `set = None, ever_down = false`. A pass already in
/// progress at `start` yields a `set` earlier than the subsequently found
/// `rise`.
pub fn find_next_pass<M: OrbitModel>(
    orbit: &mut M,
    observer: &Observer,
    start: DateTime<Utc>,
    config: &SearchConfig,
) -> Result<PassWindow, PredictError> {
    config.validate()?;

    let coarse = config.coarse_step();
    let fine = config.fine_step();
    let deadline = start + config.horizon();
    let min_el = config.min_elevation_deg;
    // A refinement can only walk back across the coarse interval it came
    // from; anything longer means the propagator is feeding us noise.
    let max_refine_steps = (config.coarse_step_s / config.fine_step_s) as u32 + 2;

    let mut window = PassWindow::default();

    // Start one fine step early so a crossing exactly at `start` still shows
    // up as a sign change.
    let mut t = start - fine;
    let first = look(orbit, observer, t)?;
    note(&mut window, first.elevation_deg, min_el);
    let mut above = first.elevation_deg >= min_el;

    let mut scan = Scan::Coarse;
    // Coarse-scan position to resume from after a refinement.
    let mut resume: (DateTime<Utc>, bool) = (t, above);
    // Most recent sample still on the post-crossing side of the threshold.
    let mut inside: (DateTime<Utc>, Topocentric) = (t, first);

    loop {
        match scan {
            Scan::Coarse => {
                let next = t + coarse;
                if next > deadline {
                    break;
                }
                let sample = look(orbit, observer, next)?;
                note(&mut window, sample.elevation_deg, min_el);
                let now_above = sample.elevation_deg >= min_el;
                if now_above != above {
                    scan = Scan::Refining {
                        rising: now_above,
                        remaining: max_refine_steps,
                    };
                    resume = (next, now_above);
                    inside = (next, sample);
                }
                t = next;
                above = now_above;
            }
            Scan::Refining { rising, remaining } => {
                let back = t - fine;
                let sample = look(orbit, observer, back)?;
                note(&mut window, sample.elevation_deg, min_el);
                let back_above = sample.elevation_deg >= min_el;

                if back_above == rising && remaining > 0 {
                    // Still on the post-crossing side; keep walking back.
                    inside = (back, sample);
                    t = back;
                    scan = Scan::Refining {
                        rising,
                        remaining: remaining - 1,
                    };
                    continue;
                }

                if back_above == rising {
                    // Walked a whole coarse interval without finding the flip
                    // back; abandon this refinement.
                    debug!("refinement at {} did not converge, resuming scan", t);
                } else {
                    let (edge_time, edge_sample) = inside;
                    let edge = PassEdge {
                        time: edge_time,
                        azimuth_deg: edge_sample.azimuth_deg,
                    };
                    if rising {
                        // Confirm the rise precedes the set by probing one
                        // coarse step ahead. Best effort: a pass shorter than
                        // the coarse step can still slip through.
                        let probe = look(orbit, observer, edge_time + coarse)?;
                        note(&mut window, probe.elevation_deg, min_el);
                        if probe.elevation_deg >= min_el && window.rise.is_none() {
                            window.rise = Some(edge);
                        } else if probe.elevation_deg < min_el {
                            debug!(
                                "discarding rise at {}: below threshold one coarse step later",
                                edge_time
                            );
                        }
                    } else if window.set.is_none() {
                        window.set = Some(edge);
                    }
                    if window.rise.is_some() && window.set.is_some() {
                        break;
                    }
                }

                let (resume_t, resume_above) = resume;
                t = resume_t;
                above = resume_above;
                scan = Scan::Coarse;
            }
        }
    }

    Ok(window)
}

fn look<M: OrbitModel>(
    orbit: &mut M,
    observer: &Observer,
    at: DateTime<Utc>,
) -> Result<Topocentric, PredictError> {
    orbit.predict(at)?;
    Ok(orbit.topocentric(observer))
}

fn note(window: &mut PassWindow, elevation_deg: f64, min_el: f64) {
    if elevation_deg >= min_el {
        window.ever_up = true;
    } else {
        window.ever_down = true;
    }
}
