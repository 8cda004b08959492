//! Parallel encode phase: channel-fed job queue, worker pool, CRC32.
//!
//! The producer enqueues every job up front and drops the sender; a
//! fixed pool of scoped threads drains the channel until it disconnects.
//! Workers hold no locks: each sends its `(mp3 filename, crc32)` result
//! over a second channel, and the results are merged into a single map
//! only after every worker has joined. Per track, the MP3 encode always
//! precedes the FLAC encode; no ordering holds across tracks.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::thread;

use crossbeam_channel::{Receiver, Sender};

use crate::command::{fill_template, run_command};
use crate::models::TrackJob;
use crate::naming;
use crate::pipeline::errors::{StepError, StepResult};
use crate::pipeline::types::Context;

/// Run the worker pool over all jobs and return the merged hash store.
///
/// Blocks until every worker has finished (the pipeline's completion
/// barrier). The first worker error aborts the run; with
/// `strict_exit_codes` off, per-track failures are logged instead, and
/// a track is absent from the returned map only when its MP3 step did
/// not complete.
pub fn encode_release(ctx: &Context, jobs: &[TrackJob]) -> StepResult<HashMap<String, String>> {
    let worker_count = ctx.settings.workers.count.max(1);

    let (job_tx, job_rx) = crossbeam_channel::unbounded::<TrackJob>();
    let (result_tx, result_rx) = crossbeam_channel::unbounded::<StepResult<(String, String)>>();

    for job in jobs {
        // Enqueue never fails: the receiver outlives this loop.
        let _ = job_tx.send(job.clone());
    }
    drop(job_tx);

    thread::scope(|scope| {
        for _ in 0..worker_count {
            let job_rx = job_rx.clone();
            let result_tx = result_tx.clone();
            scope.spawn(move || encoder_worker(ctx, job_rx, result_tx));
        }
    });
    drop(result_tx);

    let mut hashes = HashMap::new();
    for result in result_rx.iter() {
        let (filename, hash) = result?;
        hashes.insert(filename, hash);
    }

    Ok(hashes)
}

/// One worker: drain the job channel until it disconnects.
///
/// The MP3 hash is sent as soon as the MP3 encode completes, before the
/// FLAC encode runs, so a hash entry exists exactly when the track's
/// MP3 step finished, whatever later happens to the FLAC step.
fn encoder_worker(
    ctx: &Context,
    jobs: Receiver<TrackJob>,
    results: Sender<StepResult<(String, String)>>,
) {
    let strict = ctx.settings.encoders.strict_exit_codes;

    for job in jobs.iter() {
        tracing::info!("Processing {}", job.track.source_path.display());

        match encode_mp3(ctx, &job) {
            Ok(entry) => {
                let _ = results.send(Ok(entry));
            }
            Err(e) if strict => {
                let _ = results.send(Err(e));
                return;
            }
            Err(e) => {
                tracing::warn!("Track {} MP3 step failed, continuing: {}", job.number, e);
                continue;
            }
        }

        match encode_flac(ctx, &job) {
            Ok(()) => {}
            Err(e) if strict => {
                let _ = results.send(Err(e));
                return;
            }
            Err(e) => {
                tracing::warn!("Track {} FLAC step failed, continuing: {}", job.number, e);
            }
        }
    }
}

/// Encode one track to MP3 and hash the output. Runs with no lock held.
fn encode_mp3(ctx: &Context, job: &TrackJob) -> StepResult<(String, String)> {
    let track = &job.track;

    let mp3_filename = naming::mp3_filename(
        job.number,
        &track.artist,
        &track.title,
        ctx.group_initials(),
    );
    let mp3_path = ctx.mp3_dir.join(&mp3_filename);
    run_encoder(ctx, job, &ctx.settings.encoders.mp3_command, &mp3_path, "MP3 encoder")?;

    let hash = crc32_file(&mp3_path)?;
    Ok((mp3_filename, hash))
}

/// Encode one track to FLAC. The FLAC output is not hashed.
fn encode_flac(ctx: &Context, job: &TrackJob) -> StepResult<()> {
    let track = &job.track;
    let flac_filename = naming::flac_filename(job.number, &track.artist, &track.title);
    let flac_path = ctx.flac_dir.join(&flac_filename);
    run_encoder(ctx, job, &ctx.settings.encoders.flac_command, &flac_path, "FLAC encoder")
}

/// Fill one encoder command template and run it, checking the exit code.
fn run_encoder(
    ctx: &Context,
    job: &TrackJob,
    template: &str,
    output_path: &Path,
    tool: &str,
) -> StepResult<()> {
    let track = &job.track;
    let input = track.source_path.to_string_lossy().into_owned();
    let output = output_path.to_string_lossy().into_owned();
    let year = ctx.release.year.to_string();
    let track_number = job.number.to_string();

    let command_line = fill_template(
        template,
        &[
            ("input", input.as_str()),
            ("output", output.as_str()),
            ("title", track.title.as_str()),
            ("artist", track.artist.as_str()),
            ("album", ctx.release.title.as_str()),
            ("year", year.as_str()),
            ("comment", ctx.group_initials()),
            ("trackNumber", track_number.as_str()),
            ("genre", ctx.release.genre.as_str()),
        ],
    );

    let result = run_command(&command_line)?;
    if !result.success() {
        return Err(StepError::command_failed(
            tool,
            result.exit_code,
            result.stderr.trim().to_string(),
        ));
    }

    Ok(())
}

/// CRC32 of a file's contents as 8 lowercase hex digits.
pub fn crc32_file(path: &Path) -> StepResult<String> {
    let contents = fs::read(path)
        .map_err(|e| StepError::io_error(format!("reading {}", path.display()), e))?;

    let mut crc = flate2::Crc::new();
    crc.update(&contents);
    Ok(format!("{:08x}", crc.sum()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::models::{Release, Track};
    use chrono::NaiveDate;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn fake_context(dir: &TempDir, track_count: usize, workers: usize) -> (Context, Vec<TrackJob>) {
        let mut tracks = Vec::new();
        for i in 0..track_count {
            let source = dir.path().join(format!("src{:02}.wav", i + 1));
            fs::write(&source, format!("payload {}", i + 1)).unwrap();
            tracks.push(Track {
                source_path: source,
                artist: "artist".into(),
                title: format!("Song {}", i + 1),
            });
        }

        let release = Release {
            artist: "artist".into(),
            title: "album".into(),
            year: 2024,
            genre: "Test".into(),
            label: "label".into(),
            notes: String::new(),
            retail_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            release_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            cover_path: PathBuf::from("unused.jpg"),
            tracks,
        };

        let mut settings = Settings::default();
        settings.paths.mp3_release_dir = dir.path().join("mp3").to_string_lossy().into_owned();
        settings.paths.flac_release_dir = dir.path().join("flac").to_string_lossy().into_owned();
        settings.workers.count = workers;
        settings.encoders.mp3_command = "cp \"$input$\" \"$output$\"".into();
        settings.encoders.flac_command = "cp \"$input$\" \"$output$\"".into();

        let ctx = Context::new(release, settings);
        fs::create_dir_all(&ctx.mp3_dir).unwrap();
        fs::create_dir_all(&ctx.flac_dir).unwrap();

        let jobs = ctx
            .release
            .numbered_tracks()
            .map(|(number, track)| TrackJob {
                number,
                track: track.clone(),
            })
            .collect();

        (ctx, jobs)
    }

    #[test]
    fn crc32_matches_reference_vector() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("check.bin");
        fs::write(&path, b"123456789").unwrap();
        // Standard CRC32 check value.
        assert_eq!(crc32_file(&path).unwrap(), "cbf43926");
    }

    #[test]
    fn every_job_is_encoded_and_hashed_exactly_once() {
        let dir = TempDir::new().unwrap();
        let (ctx, jobs) = fake_context(&dir, 5, 3);

        let hashes = encode_release(&ctx, &jobs).unwrap();
        assert_eq!(hashes.len(), 5);

        for job in &jobs {
            let filename = naming::mp3_filename(
                job.number,
                &job.track.artist,
                &job.track.title,
                ctx.group_initials(),
            );
            assert!(hashes.contains_key(&filename), "missing {}", filename);
            assert!(ctx.mp3_dir.join(&filename).exists());
            let flac = naming::flac_filename(job.number, &job.track.artist, &job.track.title);
            assert!(ctx.flac_dir.join(&flac).exists());
        }
    }

    #[test]
    fn worker_count_does_not_change_results() {
        let dir_a = TempDir::new().unwrap();
        let (ctx_a, jobs_a) = fake_context(&dir_a, 6, 1);
        let dir_b = TempDir::new().unwrap();
        let (ctx_b, jobs_b) = fake_context(&dir_b, 6, 8);

        let serial = encode_release(&ctx_a, &jobs_a).unwrap();
        let parallel = encode_release(&ctx_b, &jobs_b).unwrap();
        assert_eq!(serial, parallel);
    }

    #[test]
    fn strict_mode_fails_on_nonzero_exit() {
        let dir = TempDir::new().unwrap();
        let (mut ctx, jobs) = fake_context(&dir, 2, 2);
        ctx.settings.encoders.mp3_command = "exit 4".into();

        match encode_release(&ctx, &jobs) {
            Err(StepError::CommandFailed { exit_code, .. }) => assert_eq!(exit_code, 4),
            other => panic!("expected CommandFailed, got {:?}", other.map(|m| m.len())),
        }
    }

    #[test]
    fn lenient_mode_keeps_hash_when_only_flac_fails() {
        let dir = TempDir::new().unwrap();
        let (mut ctx, jobs) = fake_context(&dir, 2, 2);
        ctx.settings.encoders.strict_exit_codes = false;
        ctx.settings.encoders.flac_command = "false".into();

        let hashes = encode_release(&ctx, &jobs).unwrap();

        // The MP3 encodes completed, so both hashes are recorded even
        // though every FLAC encode failed.
        assert_eq!(hashes.len(), 2);
        for job in &jobs {
            let filename = naming::mp3_filename(
                job.number,
                &job.track.artist,
                &job.track.title,
                ctx.group_initials(),
            );
            assert!(ctx.mp3_dir.join(&filename).exists());
            assert!(hashes.contains_key(&filename));
        }
    }

    #[test]
    fn lenient_mode_skips_failed_tracks() {
        let dir = TempDir::new().unwrap();
        let (mut ctx, jobs) = fake_context(&dir, 3, 2);
        ctx.settings.encoders.strict_exit_codes = false;
        ctx.settings.encoders.mp3_command = "false".into();

        let hashes = encode_release(&ctx, &jobs).unwrap();
        assert!(hashes.is_empty());
    }
}
