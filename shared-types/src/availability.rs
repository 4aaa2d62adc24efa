use std::fmt;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::calendar::CalendarDate;

/// Wall-clock start time of a slot, exchanged as `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotTime(NaiveTime);

impl SlotTime {
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    /// Accepts `HH:MM` and `HH:MM:SS`.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        NaiveTime::parse_from_str(text, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(text, "%H:%M:%S"))
            .ok()
            .map(Self)
    }

    pub fn naive(self) -> NaiveTime {
        self.0
    }

    pub fn hour(self) -> u32 {
        self.0.hour()
    }

    pub fn minute(self) -> u32 {
        self.0.minute()
    }

    /// "2:30 PM"
    pub fn twelve_hour(self) -> String {
        let (is_pm, hour) = self.0.hour12();
        format!(
            "{}:{:02} {}",
            hour,
            self.0.minute(),
            if is_pm { "PM" } else { "AM" }
        )
    }
}

impl fmt::Display for SlotTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0.hour(), self.0.minute())
    }
}

impl Serialize for SlotTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SlotTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        SlotTime::parse(&text)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid slot time `{text}`")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SlotStatus {
    #[default]
    #[serde(alias = "available")]
    Free,
    Booked,
    Blocked,
}

impl SlotStatus {
    pub fn label(self) -> &'static str {
        match self {
            SlotStatus::Free => "Available",
            SlotStatus::Booked => "Booked",
            SlotStatus::Blocked => "Unavailable",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    #[serde(alias = "start_time", alias = "start")]
    pub time: SlotTime,
    #[serde(default, alias = "end", skip_serializing_if = "Option::is_none")]
    pub end_time: Option<SlotTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub status: SlotStatus,
}

impl Slot {
    pub fn free(time: SlotTime) -> Self {
        Self {
            time,
            end_time: None,
            label: None,
            status: SlotStatus::Free,
        }
    }

    pub fn is_free(&self) -> bool {
        self.status == SlotStatus::Free
    }

    pub fn display_label(&self) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| self.time.twelve_hour())
    }
}

/// Orders slots by start time; ties keep their server order.
pub fn sort_slots(mut slots: Vec<Slot>) -> Vec<Slot> {
    slots.sort_by_key(|slot| slot.time);
    slots
}

/// The selection a slot list belongs to. A list fetched for one key is never
/// shown for another.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AvailabilityKey {
    pub salon_id: String,
    pub provider_id: String,
    pub service_id: String,
    pub date: CalendarDate,
}

impl AvailabilityKey {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("salon_id", self.salon_id.clone()),
            ("barber_id", self.provider_id.clone()),
            ("service_id", self.service_id.clone()),
            ("date", self.date.iso()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_time_accepts_seconds_and_prints_hh_mm() {
        let t = SlotTime::parse("09:30:00").unwrap();
        assert_eq!(t.to_string(), "09:30");
        assert_eq!(SlotTime::parse("9:30"), SlotTime::from_hm(9, 30));
        assert_eq!(SlotTime::parse("25:00"), None);
    }

    #[test]
    fn twelve_hour_labels() {
        assert_eq!(SlotTime::from_hm(0, 0).unwrap().twelve_hour(), "12:00 AM");
        assert_eq!(SlotTime::from_hm(10, 0).unwrap().twelve_hour(), "10:00 AM");
        assert_eq!(SlotTime::from_hm(12, 30).unwrap().twelve_hour(), "12:30 PM");
        assert_eq!(SlotTime::from_hm(17, 5).unwrap().twelve_hour(), "5:05 PM");
    }

    #[test]
    fn slots_decode_from_backend_shapes() {
        let slots: Vec<Slot> = serde_json::from_str(
            r#"[
                {"time": "10:30", "status": "booked"},
                {"start_time": "09:00:00", "end_time": "09:30:00"},
                {"time": "10:00", "status": "available", "label": "10 sharp"}
            ]"#,
        )
        .unwrap();

        let slots = sort_slots(slots);
        let times: Vec<String> = slots.iter().map(|s| s.time.to_string()).collect();
        assert_eq!(times, ["09:00", "10:00", "10:30"]);
        assert!(slots[0].is_free());
        assert_eq!(slots[0].end_time, SlotTime::from_hm(9, 30));
        assert_eq!(slots[1].display_label(), "10 sharp");
        assert!(!slots[2].is_free());
        assert_eq!(slots[2].display_label(), "10:30 AM");
    }

    #[test]
    fn key_maps_provider_to_barber_param() {
        let key = AvailabilityKey {
            salon_id: "s1".into(),
            provider_id: "b7".into(),
            service_id: "cut".into(),
            date: CalendarDate::parse("2025-11-03").unwrap(),
        };
        assert_eq!(
            key.query_pairs(),
            vec![
                ("salon_id", "s1".to_string()),
                ("barber_id", "b7".to_string()),
                ("service_id", "cut".to_string()),
                ("date", "2025-11-03".to_string()),
            ]
        );
    }
}
