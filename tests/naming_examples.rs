//! Documented naming examples and cross-module behavior.

use meshname::{
    CodeRegistry, ContactUrl, ExtensionRole, FieldKind, InfrastructureTier, IssueKind,
    LengthPolicy, Mobility, NodeName, NodeNameBuilder, NodeNameGrammar, PublicKeyId, ServerKind,
    StructuralError, TypeRoleCode, ValidationResult, validate,
};

fn grammar() -> &'static NodeNameGrammar {
    NodeNameGrammar::canonical()
}

#[test]
fn public_types_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<NodeNameGrammar>();
    assert_send_sync::<NodeName>();
    assert_send_sync::<ValidationResult>();
    assert_send_sync::<CodeRegistry>();
}

#[test]
fn documented_valid_name() {
    let ValidationResult::Valid(name) = validate("CO-DENVER-CHSPARK-RC01", grammar()) else {
        panic!("expected a valid name");
    };
    assert_eq!(name.state(), "CO");
    assert_eq!(name.city(), "DENVER");
    assert_eq!(name.landmark(), "CHSPARK");
    assert_eq!(name.type_role(), &TypeRoleCode::CoreRepeater);
    assert_eq!(name.type_role().tier(), InfrastructureTier::Core);
    assert_eq!(name.counter(), 1);
}

#[test]
fn documented_overlong_name() {
    let result = validate("COLORADO-DENVER-CHEESMANPARK-RC01", grammar());
    assert!(!result.is_valid());

    let state: Vec<_> = result.issues_for(FieldKind::State).collect();
    assert_eq!(state.len(), 2);
    assert_eq!(
        state[0].kind,
        IssueKind::FieldLength {
            min: 2,
            max: 3,
            actual: 8
        }
    );
    assert!(matches!(&state[1].kind, IssueKind::FieldEnum { value, .. } if value == "COLORADO"));

    let landmark: Vec<_> = result.issues_for(FieldKind::Landmark).collect();
    assert_eq!(landmark.len(), 1);
    assert_eq!(
        landmark[0].kind,
        IssueKind::FieldLength {
            min: 1,
            max: 7,
            actual: 12
        }
    );

    assert_eq!(result.issues_for(FieldKind::City).count(), 0);
}

#[test]
fn documented_unknown_role() {
    let result = validate("CO-DENVER-CHSPARK-XX01", grammar());
    let issues = result.issues();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].field, Some(FieldKind::TypeRole));
    assert!(matches!(
        &issues[0].kind,
        IssueKind::FieldEnum { value, .. } if value == "XX"
    ));
}

#[test]
fn every_core_role_validates() {
    for role in TypeRoleCode::CORE {
        let candidate = format!("CO-DENVER-CHSPARK-{}01", role.as_str());
        let name = NodeName::parse(&candidate).unwrap();
        assert_eq!(name.type_role(), &role);
    }
}

#[test]
fn role_metadata_table() {
    let rows = [
        ("T", ServerKind::Room, Mobility::Static, InfrastructureTier::None),
        ("TM", ServerKind::Room, Mobility::Mobile, InfrastructureTier::None),
        ("TR", ServerKind::Room, Mobility::Static, InfrastructureTier::Edge),
        ("RC", ServerKind::Repeater, Mobility::Static, InfrastructureTier::Core),
        ("RD", ServerKind::Repeater, Mobility::Static, InfrastructureTier::Distribution),
        ("RE", ServerKind::Repeater, Mobility::Static, InfrastructureTier::Edge),
        ("RM", ServerKind::Repeater, Mobility::Mobile, InfrastructureTier::None),
    ];
    for (code, server, mobility, tier) in rows {
        let role: TypeRoleCode = code.parse().unwrap();
        assert_eq!(role.server_kind(), server, "{code}");
        assert_eq!(role.mobility(), mobility, "{code}");
        assert_eq!(role.tier(), tier, "{code}");
    }
}

#[test]
fn generator_and_validator_agree() {
    let generated = grammar()
        .generate("co", "denver", "chspark", "rc", 1)
        .unwrap();
    let validated = NodeName::parse("CO-DENVER-CHSPARK-RC01").unwrap();
    assert_eq!(generated, validated);

    let err = grammar()
        .generate("COLORADO", "DENVER", "CHEESMANPARK", "RC", 1)
        .unwrap_err();
    assert_eq!(
        err.issues,
        validate("COLORADO-DENVER-CHEESMANPARK-RC01", grammar()).issues()
    );
}

#[test]
fn extension_role_through_registry() {
    let mut registry = CodeRegistry::builtin();
    registry
        .add_role(
            ExtensionRole::new(
                "RS",
                ServerKind::Repeater,
                Mobility::Static,
                InfrastructureTier::Edge,
            )
            .unwrap(),
        )
        .unwrap();
    registry.add_region("DEN", "Denver metro").unwrap();
    let grammar = NodeNameGrammar::from_registry(registry).unwrap();

    let name = NodeNameBuilder::with_grammar(&grammar)
        .state("den")
        .city("aurora")
        .landmark("lowry")
        .type_role("rs")
        .counter(3)
        .build()
        .unwrap();
    assert_eq!(name.as_str(), "DEN-AURORA-LOWRY-RS03");
    assert!(!name.type_role().is_core());
    assert_eq!(name.type_role().tier(), InfrastructureTier::Edge);

    // Unknown to the canonical grammar.
    assert!(NodeName::parse("CO-AURORA-LOWRY-RS03").is_err());
}

#[test]
fn length_policies() {
    let registry = CodeRegistry::builtin();
    let fields = NodeNameGrammar::standard_fields(&registry);
    assert!(NodeNameGrammar::new(fields.clone(), registry.clone(), LengthPolicy::Capped).is_ok());
    assert_eq!(
        NodeNameGrammar::new(fields, registry, LengthPolicy::Strict).unwrap_err(),
        StructuralError::WorstCaseTooLong {
            worst_case: 24,
            max: 23
        }
    );
}

#[test]
fn contact_link_for_validated_name() {
    let name = NodeName::parse("TX-AUSTIN-CAPITOL-RD02").unwrap();
    let key = PublicKeyId::parse(&"7c".repeat(32)).unwrap();
    assert!(!key.is_reserved());
    let url = ContactUrl::new(&name, &key).unwrap();
    assert_eq!(
        url.as_str(),
        format!(
            "meshcore://contact/add?name=TX-AUSTIN-CAPITOL-RD02&public_key={}&type=2",
            "7C".repeat(32)
        )
    );
}

#[cfg(feature = "serde")]
#[test]
fn validation_result_serializes() {
    let result = validate("CO-DENVER-CHSPARK-XX01", grammar());
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["valid"], false);
    assert!(json["name"].is_null());
    assert_eq!(json["issues"][0]["field"], "type_role");
    assert_eq!(json["issues"][0]["index"], 3);
    assert_eq!(json["issues"][0]["issue"]["type"], "field_enum");
    assert_eq!(json["issues"][0]["issue"]["value"], "XX");

    let result = validate("CO-DENVER-CHSPARK-RC01", grammar());
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["valid"], true);
    assert_eq!(json["name"], "CO-DENVER-CHSPARK-RC01");
    assert_eq!(json["issues"].as_array().map(Vec::len), Some(0));
}

#[cfg(feature = "config")]
#[test]
fn registry_from_json_feeds_grammar() {
    let registry = CodeRegistry::from_json(
        r#"{
            "regions": [{ "code": "DEN", "name": "Denver metro" }],
            "roles": [{ "code": "RS", "server": "repeater", "mobility": "static", "tier": "edge" }]
        }"#,
    )
    .unwrap();
    let grammar = NodeNameGrammar::from_registry(registry).unwrap();
    assert!(grammar.validate("DEN-AURORA-LOWRY-RS01").is_valid());
    assert!(grammar.validate("CO-DENVER-CHSPARK-RC01").is_valid());
}
