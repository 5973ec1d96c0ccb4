//! Capabilities — the services and characteristics an accessory exposes to
//! its host, in HomeKit vocabulary.

use serde::{Deserialize, Serialize};

use crate::accessory::AccessoryInformation;
use crate::door::DoorState;

// https://github.com/homebridge/HAP-NodeJS/blob/latest/src/lib/definitions/ServiceDefinitions.ts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HomekitService {
    AccessoryInformation,
    GarageDoorOpener,
}

// https://github.com/homebridge/HAP-NodeJS/blob/latest/src/lib/definitions/CharacteristicDefinitions.ts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HomekitCharacteristic {
    CurrentDoorState,
    FirmwareRevision,
    Manufacturer,
    Model,
    Name,
    ObstructionDetected,
    SerialNumber,
    TargetDoorState,
}

/// How the host may interact with a characteristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Access {
    /// Readable only.
    Read,
    /// Readable, with change notifications.
    ReadNotify,
    /// Readable, writable, with change notifications.
    ReadWriteNotify,
}

/// A single characteristic and its current value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacteristicDescriptor {
    pub characteristic: HomekitCharacteristic,
    pub access: Access,
    pub value: serde_json::Value,
}

impl CharacteristicDescriptor {
    fn read(characteristic: HomekitCharacteristic, value: impl Into<serde_json::Value>) -> Self {
        Self {
            characteristic,
            access: Access::Read,
            value: value.into(),
        }
    }
}

/// A service grouping related characteristics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Capability {
    pub service: HomekitService,
    pub characteristics: Vec<CharacteristicDescriptor>,
}

impl Capability {
    /// Find a characteristic in this service.
    #[must_use]
    pub fn get(&self, characteristic: HomekitCharacteristic) -> Option<&CharacteristicDescriptor> {
        self.characteristics
            .iter()
            .find(|c| c.characteristic == characteristic)
    }
}

/// Build the descriptor set of a garage door accessory.
///
/// Always two services: the identification service and the door opener.
#[must_use]
pub fn garage_door_capabilities(
    name: &str,
    info: &AccessoryInformation,
    door: &DoorState,
) -> Vec<Capability> {
    vec![
        Capability {
            service: HomekitService::AccessoryInformation,
            characteristics: vec![
                CharacteristicDescriptor::read(HomekitCharacteristic::Name, name),
                CharacteristicDescriptor::read(
                    HomekitCharacteristic::Manufacturer,
                    info.manufacturer.as_str(),
                ),
                CharacteristicDescriptor::read(HomekitCharacteristic::Model, info.model.as_str()),
                CharacteristicDescriptor::read(
                    HomekitCharacteristic::FirmwareRevision,
                    info.firmware_revision.as_str(),
                ),
                CharacteristicDescriptor::read(
                    HomekitCharacteristic::SerialNumber,
                    info.serial_number.as_str(),
                ),
            ],
        },
        Capability {
            service: HomekitService::GarageDoorOpener,
            characteristics: vec![
                CharacteristicDescriptor {
                    characteristic: HomekitCharacteristic::CurrentDoorState,
                    access: Access::ReadNotify,
                    value: door.current.as_characteristic().into(),
                },
                CharacteristicDescriptor {
                    characteristic: HomekitCharacteristic::TargetDoorState,
                    access: Access::ReadWriteNotify,
                    value: door.target.as_characteristic().into(),
                },
                CharacteristicDescriptor {
                    characteristic: HomekitCharacteristic::ObstructionDetected,
                    access: Access::ReadNotify,
                    value: false.into(),
                },
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::door::DoorPosition;

    fn opener(caps: &[Capability]) -> &Capability {
        caps.iter()
            .find(|c| c.service == HomekitService::GarageDoorOpener)
            .unwrap()
    }

    #[test]
    fn should_expose_information_and_opener_services() {
        let caps = garage_door_capabilities(
            "Garage",
            &AccessoryInformation::default(),
            &DoorState::at(DoorPosition::Open),
        );
        let services: Vec<_> = caps.iter().map(|c| c.service).collect();
        assert_eq!(
            services,
            vec![
                HomekitService::AccessoryInformation,
                HomekitService::GarageDoorOpener
            ]
        );
    }

    #[test]
    fn should_reflect_door_state_in_characteristics() {
        let caps = garage_door_capabilities(
            "Garage",
            &AccessoryInformation::default(),
            &DoorState::at(DoorPosition::Closed),
        );
        let opener = opener(&caps);
        assert_eq!(
            opener.get(HomekitCharacteristic::CurrentDoorState).unwrap().value,
            serde_json::json!(1)
        );
        assert_eq!(
            opener.get(HomekitCharacteristic::TargetDoorState).unwrap().access,
            Access::ReadWriteNotify
        );
    }

    #[test]
    fn should_carry_identification_strings() {
        let info = AccessoryInformation {
            manufacturer: "Acme".to_string(),
            ..AccessoryInformation::default()
        };
        let caps = garage_door_capabilities("Shed", &info, &DoorState::at(DoorPosition::Open));
        let information = &caps[0];
        assert_eq!(
            information.get(HomekitCharacteristic::Name).unwrap().value,
            serde_json::json!("Shed")
        );
        assert_eq!(
            information.get(HomekitCharacteristic::Manufacturer).unwrap().value,
            serde_json::json!("Acme")
        );
        assert!(information
            .characteristics
            .iter()
            .all(|c| c.access == Access::Read));
    }
}
