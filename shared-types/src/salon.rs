use serde::{Deserialize, Serialize};

use crate::appointment::{ProviderRef, SalonRef, ServiceRef};
use crate::ids;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    #[serde(deserialize_with = "ids::string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default)]
    pub specialties: Vec<String>,
}

impl Provider {
    pub fn specialty_summary(&self) -> String {
        if self.specialties.is_empty() {
            "All services".to_string()
        } else {
            self.specialties.join(" · ")
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceOffering {
    #[serde(deserialize_with = "ids::string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default, alias = "durationMin", alias = "duration")]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub price: Option<f64>,
}

impl ServiceOffering {
    pub fn price_label(&self) -> String {
        format_price(self.price)
    }

    pub fn duration_label(&self) -> String {
        match self.duration_minutes {
            Some(minutes) => format!("{minutes} min"),
            None => "Duration varies".to_string(),
        }
    }
}

pub fn format_price(price: Option<f64>) -> String {
    match price {
        Some(amount) => format!("${amount:.2}"),
        None => "Price at salon".to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalonDetail {
    #[serde(deserialize_with = "ids::string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub hours: Option<String>,
    #[serde(default)]
    pub services: Vec<ServiceOffering>,
    /// `None` when the salon payload did not embed its team.
    #[serde(default, alias = "barbers")]
    pub employees: Option<Vec<Provider>>,
}

impl From<&SalonDetail> for SalonRef {
    fn from(salon: &SalonDetail) -> Self {
        SalonRef {
            id: salon.id.clone(),
            name: salon.name.clone(),
            address: salon.address.clone(),
        }
    }
}

impl From<&ServiceOffering> for ServiceRef {
    fn from(service: &ServiceOffering) -> Self {
        ServiceRef {
            id: service.id.clone(),
            name: service.name.clone(),
            price: service.price,
            duration_minutes: service.duration_minutes,
        }
    }
}

impl From<&Provider> for ProviderRef {
    fn from(provider: &Provider) -> Self {
        ProviderRef {
            id: provider.id.clone(),
            name: provider.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn salon_without_team_keeps_employees_unset() {
        let salon: SalonDetail = serde_json::from_str(
            r#"{"id": 3, "name": "Fade Factory",
                "services": [{"id": "cut", "name": "Haircut", "durationMin": 45, "price": 35}]}"#,
        )
        .unwrap();
        assert_eq!(salon.id, "3");
        assert_eq!(salon.employees, None);
        assert_eq!(salon.services[0].duration_label(), "45 min");
        assert_eq!(salon.services[0].price_label(), "$35.00");
    }

    #[test]
    fn refs_copy_display_fields() {
        let provider = Provider {
            id: "b1".into(),
            name: "Marco".into(),
            avatar: None,
            specialties: vec!["Fades".into(), "Beards".into()],
        };
        assert_eq!(ProviderRef::from(&provider).name, "Marco");
        assert_eq!(provider.specialty_summary(), "Fades · Beards");
        assert_eq!(format_price(None), "Price at salon");
    }
}
