use resireg_core::{Allocation, Identity, ModelValidationError, Room, RoomType, Student};
use serde_json::json;

#[test]
fn student_serializes_to_flat_strings() {
    let student = Student::parse(
        "Alex Yeoh",
        "91234567",
        "alex@example.com",
        "Computing",
        "e0123456",
    )
    .unwrap();

    let value = serde_json::to_value(&student).unwrap();

    assert_eq!(
        value,
        json!({
            "name": "Alex Yeoh",
            "phone": "91234567",
            "email": "alex@example.com",
            "faculty": "Computing",
            "student_id": "E0123456",
        })
    );
}

#[test]
fn deserialization_runs_field_validation() {
    let err = serde_json::from_value::<Student>(json!({
        "name": "Alex Yeoh",
        "phone": "12",
        "email": "alex@example.com",
        "faculty": "Computing",
        "student_id": "E0123456",
    }))
    .unwrap_err();
    assert!(err.to_string().contains("phone"));

    let err = serde_json::from_value::<Room>(json!({
        "floor": 0,
        "room_number": 1,
        "room_type": "CA",
    }))
    .unwrap_err();
    assert!(err.to_string().contains("floor"));
}

#[test]
fn room_and_allocation_wire_shape() {
    let room: Room = serde_json::from_value(json!({
        "floor": 8,
        "room_number": 109,
        "room_type": "SA",
    }))
    .unwrap();
    assert_eq!(room.room_type, RoomType::SuiteAircon);
    assert_eq!(room.identity().to_string(), "08-109");

    let student =
        Student::parse("Bernice Yu", "81234567", "b@example.org", "Law", "E7654321").unwrap();
    let allocation = Allocation::between(&student, &room);
    assert_eq!(
        serde_json::to_value(&allocation).unwrap(),
        json!({"student_id": "E7654321", "floor": 8, "room_number": 109})
    );
}

#[test]
fn edited_fields_keep_identity_but_break_equality() {
    let original =
        Student::parse("Alex Yeoh", "91234567", "alex@example.com", "Computing", "E0000001")
            .unwrap();
    let edited =
        Student::parse("Alex Yeoh", "98765432", "alex@example.com", "Computing", "E0000001")
            .unwrap();

    assert!(original.same_identity(&edited));
    assert_ne!(original, edited);
}

#[test]
fn invalid_room_type_is_rejected() {
    assert_eq!(
        Room::parse(1, 1, "XL").unwrap_err(),
        ModelValidationError::UnknownRoomType("XL".to_string())
    );
}
