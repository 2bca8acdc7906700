use crate::core::geo::LatLng;
use crossbeam_channel::{bounded, Receiver, Sender};

/// Environment variable read by [`EnvLocationProvider`], as `lat,lng`
pub const LOCATION_ENV_VAR: &str = "ATLAS_LOCATION";

/// Source of the device position for the locate-me control. Lookups may
/// block, so they run off the UI thread.
pub trait LocationProvider: Send + 'static {
    /// The current position, or `None` when unavailable or denied
    fn locate(&self) -> Option<LatLng>;
}

/// Desktop provider: reads a fixed position from the `ATLAS_LOCATION`
/// environment variable (`lat,lng`). Desktop machines have no positioning
/// hardware to ask, so the operator supplies the position instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvLocationProvider;

impl LocationProvider for EnvLocationProvider {
    fn locate(&self) -> Option<LatLng> {
        std::env::var(LOCATION_ENV_VAR)
            .ok()
            .and_then(|raw| parse_coords(&raw))
    }
}

fn parse_coords(raw: &str) -> Option<LatLng> {
    let (lat, lng) = raw.split_once(',')?;
    let lat: f64 = lat.trim().parse().ok()?;
    let lng: f64 = lng.trim().parse().ok()?;
    let position = LatLng::new(lat, lng);
    position.is_valid().then_some(position)
}

/// Result of one locate-me lookup. Failure is reported explicitly so the
/// UI can show a notice instead of waiting forever.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocateOutcome {
    Position(LatLng),
    Failed,
}

/// Bridges a background position lookup back to the UI thread.
///
/// A completed lookup only ever moves the viewport; it never becomes a
/// filter or a drawn region. Results are delivered through a channel and
/// picked up by polling once per frame.
pub struct LocateHandle {
    tx: Sender<Option<LatLng>>,
    rx: Receiver<Option<LatLng>>,
    pending: bool,
}

impl LocateHandle {
    pub fn new() -> Self {
        let (tx, rx) = bounded(1);
        Self {
            tx,
            rx,
            pending: false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Starts a lookup on a background thread. A request while one is
    /// already in flight is ignored.
    pub fn request<P: LocationProvider>(&mut self, provider: P) {
        if self.pending {
            return;
        }
        self.pending = true;
        let tx = self.tx.clone();
        std::thread::spawn(move || {
            let result = provider.locate();
            if tx.send(result).is_err() {
                log::debug!("locate result dropped; handle was discarded");
            }
        });
    }

    /// Non-blocking poll for a completed lookup. Returns the outcome at
    /// most once per request; `None` while nothing has finished yet.
    pub fn poll(&mut self) -> Option<LocateOutcome> {
        match self.rx.try_recv() {
            Ok(Some(position)) => {
                self.pending = false;
                Some(LocateOutcome::Position(position))
            }
            Ok(None) => {
                self.pending = false;
                log::info!("location lookup failed or was denied");
                Some(LocateOutcome::Failed)
            }
            Err(_) => None,
        }
    }
}

impl Default for LocateHandle {
    fn default() -> Self {
        Self::new()
    }
}
