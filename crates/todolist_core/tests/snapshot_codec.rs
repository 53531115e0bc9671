use todolist_core::{decode_snapshot, encode_snapshot, Item, ItemId, PersistError};

#[test]
fn encoded_snapshot_decodes_to_same_items() {
    let items = vec![
        Item::new(ItemId::new(1), "a"),
        Item::new(ItemId::new(2), "b").with_completed(true),
    ];

    let decoded = decode_snapshot(&encode_snapshot(&items).unwrap()).unwrap();
    assert_eq!(decoded.items, items);
    assert!(decoded.rejected.is_empty());
}

#[test]
fn non_array_document_is_rejected_whole() {
    let err = decode_snapshot(r#"{"id":1}"#).unwrap_err();
    assert!(matches!(err, PersistError::Malformed(_)));
    assert!(err.to_string().contains("object"));

    let err = decode_snapshot("not json").unwrap_err();
    assert!(matches!(err, PersistError::Malformed(_)));
}

#[test]
fn invalid_records_are_dropped_and_reported() {
    let raw = r#"[
        {"id": 1, "active": "ok", "completed": false},
        {"id": 2, "active": "missing flag"},
        {"id": "3", "active": "string id", "completed": false},
        {"id": 0, "active": "zero id", "completed": false},
        {"id": 5, "active": "", "completed": true},
        {"id": 1, "active": "duplicate", "completed": true},
        {"id": 7, "active": "also ok", "completed": true}
    ]"#;

    let decoded = decode_snapshot(raw).unwrap();
    let ids: Vec<i64> = decoded.items.iter().map(|item| item.id.get()).collect();
    assert_eq!(ids, [1, 7]);

    let rejected: Vec<usize> = decoded.rejected.iter().map(|r| r.index).collect();
    assert_eq!(rejected, [1, 2, 3, 4, 5]);
    assert!(decoded.rejected[4].reason.contains("duplicate"));
}

#[test]
fn validation_message_surfaces_in_rejection_reason() {
    let decoded = decode_snapshot(r#"[{"id":-4,"active":"x","completed":false}]"#).unwrap();
    assert!(decoded.items.is_empty());
    assert!(
        decoded.rejected[0].reason.contains("must be positive"),
        "unexpected reason: {}",
        decoded.rejected[0].reason
    );
}
