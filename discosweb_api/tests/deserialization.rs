use discosweb_api::types::{
    LaunchAttributes, LaunchOutcome, ListResponse, ObjectAttributes, OptionalResponse, Record,
    StageAttributes, VehicleAttributes,
};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

#[test]
fn deserialize_launches() {
    let json = load_fixture("launches.json");
    let resp: ListResponse<Record<LaunchAttributes>> = serde_json::from_str(&json).unwrap();
    assert_eq!(resp.data.len(), 2);

    let first = &resp.data[0];
    assert_eq!(first.id, "6201");
    assert_eq!(first.kind.as_deref(), Some("launch"));
    assert_eq!(first.numeric_id().unwrap(), 6201);
    assert_eq!(
        first.attributes.epoch.as_deref(),
        Some("2022-01-06T21:49:10+00:00")
    );
    assert_eq!(first.attributes.flight_no.as_deref(), Some("F9-136"));
    assert_eq!(first.attributes.outcome(), LaunchOutcome::Success);
    let vehicle = first.relationships.get("vehicle").unwrap();
    assert_eq!(
        vehicle.links.as_ref().unwrap().related.as_deref(),
        Some("/api/launches/6201/vehicle")
    );

    let second = &resp.data[1];
    assert_eq!(second.attributes.flight_no, None);
    assert_eq!(second.attributes.outcome(), LaunchOutcome::Unknown);
    assert!(second.relationships.is_empty());
}

#[test]
fn failure_attribute_is_tri_state() {
    let parse = |failure: &str| -> LaunchOutcome {
        let json = format!(r#"{{"epoch": null, "failure": {}}}"#, failure);
        serde_json::from_str::<LaunchAttributes>(&json)
            .unwrap()
            .outcome()
    };
    assert_eq!(parse("true"), LaunchOutcome::Failure);
    assert_eq!(parse("false"), LaunchOutcome::Success);
    assert_eq!(parse("null"), LaunchOutcome::Unknown);
    assert_eq!(parse("\"unknown\""), LaunchOutcome::Unknown);

    let missing: LaunchAttributes = serde_json::from_str("{}").unwrap();
    assert_eq!(missing.outcome(), LaunchOutcome::Unknown);
}

#[test]
fn deserialize_objects() {
    let json = load_fixture("objects.json");
    let resp: ListResponse<Record<ObjectAttributes>> = serde_json::from_str(&json).unwrap();
    assert_eq!(resp.data.len(), 2);
    assert_eq!(resp.data[0].attributes.object_class.as_deref(), Some("Payload"));
    assert_eq!(resp.data[0].attributes.satno, Some(51090));
    assert_eq!(resp.data[0].attributes.mass, Some(260.0));
    assert_eq!(resp.data[1].attributes.satno, None);
    assert_eq!(resp.data[1].attributes.mass, None);
}

#[test]
fn deserialize_vehicle() {
    let json = load_fixture("vehicle.json");
    let resp: OptionalResponse<Record<VehicleAttributes>> = serde_json::from_str(&json).unwrap();
    let vehicle = resp.data.unwrap();
    assert_eq!(vehicle.id, "312");
    assert_eq!(vehicle.attributes.successful_launches, Some(150));
}

#[test]
fn deserialize_missing_vehicle() {
    let json = load_fixture("vehicle_null.json");
    let resp: OptionalResponse<Record<VehicleAttributes>> = serde_json::from_str(&json).unwrap();
    assert!(resp.data.is_none());

    let resp: OptionalResponse<Record<VehicleAttributes>> =
        serde_json::from_str(r#"{"data": []}"#).unwrap();
    assert!(resp.data.is_none());
}

#[test]
fn vehicle_wrapped_in_single_element_list() {
    let json = r#"{"data": [{"id": "312", "type": "launchVehicle", "attributes": {"name": "Falcon 9"}}]}"#;
    let resp: OptionalResponse<Record<VehicleAttributes>> = serde_json::from_str(json).unwrap();
    assert_eq!(resp.data.unwrap().attributes.name.as_deref(), Some("Falcon 9"));

    let two = r#"{"data": [{"id": "1", "attributes": {}}, {"id": "2", "attributes": {}}]}"#;
    assert!(serde_json::from_str::<OptionalResponse<Record<VehicleAttributes>>>(two).is_err());
}

#[test]
fn deserialize_stages_with_null_masses() {
    let json = load_fixture("stages.json");
    let resp: ListResponse<Record<StageAttributes>> = serde_json::from_str(&json).unwrap();
    assert_eq!(resp.data.len(), 2);

    let first = &resp.data[0].attributes;
    assert_eq!(first.fuel_mass, None);
    assert_eq!(first.oxidiser_mass, Some(5.0));
    assert_eq!(first.solid_propellant_mass, None);

    let second = &resp.data[1].attributes;
    assert_eq!(second.fuel_mass, Some(2.0));
    assert_eq!(second.dry_mass, None);
}

#[test]
fn deserialize_empty_page() {
    let json = load_fixture("empty.json");
    let resp: ListResponse<Record<LaunchAttributes>> = serde_json::from_str(&json).unwrap();
    assert!(resp.data.is_empty());
}

#[test]
fn envelopes_are_debuggable() {
    let json = load_fixture("vehicle.json");
    let vehicle: OptionalResponse<Record<VehicleAttributes>> = serde_json::from_str(&json).unwrap();
    assert!(format!("{:?}", vehicle).contains("312"));

    let json = load_fixture("launches.json");
    let launches: ListResponse<Record<LaunchAttributes>> = serde_json::from_str(&json).unwrap();
    assert!(format!("{:?}", launches).contains("6201"));
}
