/// Stand-in audio device that logs what it is told to do
use cadence_core::{format_time, Track};
use cadence_playback::PlayerDevice;

#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingDevice;

impl PlayerDevice for LoggingDevice {
    fn load(&mut self, track: &Track) {
        tracing::info!(
            track_id = %track.id,
            duration = %format_time(track.duration_seconds),
            "device: load \"{}\" by {}",
            track.title,
            track.artist
        );
    }

    fn play(&mut self) {
        tracing::info!("device: play");
    }

    fn pause(&mut self) {
        tracing::info!("device: pause");
    }

    fn stop(&mut self) {
        tracing::info!("device: stop");
    }

    fn seek_to(&mut self, seconds: f64) {
        tracing::info!("device: seek to {}", format_time(seconds));
    }

    fn set_volume(&mut self, percent: u8) {
        tracing::info!("device: volume {}%", percent);
    }
}
