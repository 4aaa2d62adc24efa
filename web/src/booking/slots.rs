use shared_types::{AvailabilityKey, Slot, SlotTime};

use crate::error::BookingError;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum SlotsState {
    #[default]
    Idle,
    Loading,
    Ready(Vec<Slot>),
    Failed(BookingError),
}

/// Ticket for one availability request. Only the newest ticket's result is
/// ever applied.
#[derive(Debug, Clone, PartialEq)]
pub struct AvailabilityQuery {
    pub key: AvailabilityKey,
    generation: u64,
}

impl AvailabilityQuery {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Slots for the current selection. Responses that arrive for an older
/// ticket are dropped, so a slow first request cannot overwrite a fast
/// second one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotBoard {
    generation: u64,
    key: Option<AvailabilityKey>,
    state: SlotsState,
}

impl SlotBoard {
    pub fn begin(&mut self, key: AvailabilityKey) -> AvailabilityQuery {
        self.generation += 1;
        self.key = Some(key.clone());
        self.state = SlotsState::Loading;
        AvailabilityQuery {
            key,
            generation: self.generation,
        }
    }

    /// Returns whether the result was applied.
    pub fn resolve(
        &mut self,
        query: &AvailabilityQuery,
        result: Result<Vec<Slot>, BookingError>,
    ) -> bool {
        if query.generation != self.generation || self.key.as_ref() != Some(&query.key) {
            tracing::debug!(
                stale = query.generation,
                current = self.generation,
                "dropping superseded availability response"
            );
            return false;
        }
        self.state = match result {
            Ok(slots) => SlotsState::Ready(slots),
            Err(err) => SlotsState::Failed(err),
        };
        true
    }

    /// Forgets the current key; anything still in flight becomes stale.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.key = None;
        self.state = SlotsState::Idle;
    }

    pub fn state(&self) -> &SlotsState {
        &self.state
    }

    pub fn key(&self) -> Option<&AvailabilityKey> {
        self.key.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.state == SlotsState::Loading
    }

    pub fn slots(&self) -> &[Slot] {
        match &self.state {
            SlotsState::Ready(slots) => slots,
            _ => &[],
        }
    }

    pub fn free_slot(&self, time: SlotTime) -> Option<&Slot> {
        self.slots()
            .iter()
            .find(|slot| slot.time == time && slot.is_free())
    }
}
