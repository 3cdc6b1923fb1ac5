//! Comprehensive unit tests for the Identifiers module
//!
//! Tests cover identifier creation, parsing, conversion, display
//! formatting, and the time-ordering guarantee of v7 identifiers.

use core_kernel::{BillId, LandlordId, LedgerEntryId, PropertyId, TenancyId, TenantId};
use uuid::Uuid;

mod creation {
    use super::*;

    #[test]
    fn test_new_generates_unique_ids() {
        assert_ne!(TenancyId::new(), TenancyId::new());
        assert_ne!(BillId::new(), BillId::new());
    }

    #[test]
    fn test_new_v7_ids_are_time_ordered() {
        let first = LedgerEntryId::new_v7();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = LedgerEntryId::new_v7();
        assert!(first < second);
    }

    #[test]
    fn test_from_uuid() {
        let uuid = Uuid::new_v4();
        let id = BillId::from_uuid(uuid);
        assert_eq!(*id.as_uuid(), uuid);
    }

    #[test]
    fn test_default_generates_a_fresh_id() {
        assert_ne!(PropertyId::default(), PropertyId::default());
    }
}

mod display_and_parsing {
    use super::*;

    #[test]
    fn test_display_carries_the_type_prefix() {
        assert!(LandlordId::new().to_string().starts_with("LLD-"));
        assert!(TenantId::new().to_string().starts_with("TNT-"));
        assert!(PropertyId::new().to_string().starts_with("PRP-"));
        assert!(TenancyId::new().to_string().starts_with("TCY-"));
        assert!(BillId::new().to_string().starts_with("BIL-"));
        assert!(LedgerEntryId::new().to_string().starts_with("ENT-"));
    }

    #[test]
    fn test_parse_round_trips_through_display() {
        let original = TenancyId::new();
        let parsed: TenancyId = original.to_string().parse().unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_parse_accepts_a_bare_uuid() {
        let uuid = Uuid::new_v4();
        let parsed: BillId = uuid.to_string().parse().unwrap();
        assert_eq!(*parsed.as_uuid(), uuid);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("not-a-uuid".parse::<LedgerEntryId>().is_err());
    }
}

mod conversion {
    use super::*;

    #[test]
    fn test_uuid_round_trip() {
        let uuid = Uuid::new_v4();
        let id = LedgerEntryId::from(uuid);
        let back: Uuid = id.into();
        assert_eq!(uuid, back);
    }

    #[test]
    fn test_serde_is_transparent() {
        let id = BillId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.as_uuid()));

        let back: BillId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
