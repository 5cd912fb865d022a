use panel_object_editor::object_editor::remove_segment;
use panel_object_editor::{
    ControlInput, EditorEvent, EditorOptions, GroupLayout, Interaction, NO_ITEMS_PLACEHOLDER,
    ObjectEditor, Value, ViewNode, ViewTree,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn json(value: serde_json::Value) -> Value {
    Value::from(value)
}

fn remove_action(view: &ViewTree, render_key: &str) -> panel_object_editor::ActionId {
    if let Some(control) = view.control(render_key) {
        return control.remove.as_ref().map(|b| b.action).expect("remove button");
    }
    view.group(render_key)
        .and_then(|group| group.delete.as_ref())
        .map(|b| b.action)
        .expect("delete button")
}

fn add_action(view: &ViewTree, render_key: &str) -> panel_object_editor::ActionId {
    view.group(render_key)
        .and_then(|group| group.header.as_ref())
        .and_then(|header| header.add.as_ref())
        .map(|b| b.action)
        .expect("add button")
}

fn dns_options() -> EditorOptions {
    EditorOptions::new().with_new_button("root_DNSServers", |servers| {
        if let Value::List(items) = servers {
            items.push(Value::Text(String::new()));
        }
    })
}

#[test]
fn dns_servers_scenario_lays_out_grids_and_flat_panel() {
    init_tracing();
    let mut editor = ObjectEditor::new(
        "dns",
        json(serde_json::json!({"DNSServers": ["9.9.9.9"], "Enabled": true})),
        dns_options(),
    );
    let view = editor.render();

    assert!(view.root_scalars.is_empty());
    assert_eq!(view.root_booleans.len(), 1);
    let enabled = &view.root_booleans[0];
    assert_eq!(enabled.label.as_deref(), Some("Enabled"));
    assert_eq!(enabled.input, Some(ControlInput::Toggle(true)));

    assert_eq!(view.groups.len(), 1);
    let servers = &view.groups[0];
    assert_eq!(servers.title(), Some("DNSServers"));
    assert_eq!(servers.layout, GroupLayout::Flat);
    assert!(servers.header.as_ref().and_then(|h| h.add.as_ref()).is_some());
    let [ViewNode::Control(row)] = servers.items() else {
        panic!("expected a single row");
    };
    assert_eq!(row.input, Some(ControlInput::Text("9.9.9.9".into())));
    assert!(row.remove.is_some());
}

#[test]
fn deleting_sole_dns_server_leaves_placeholder() {
    let mut editor = ObjectEditor::new(
        "dns",
        json(serde_json::json!({"DNSServers": ["9.9.9.9"], "Enabled": true})),
        dns_options(),
    );
    let view = editor.render();
    editor
        .press(&view, remove_action(&view, "root_DNSServers_0"))
        .expect("remove");

    let view = editor.render();
    let servers = view.group("root_DNSServers").expect("servers");
    assert_eq!(servers.placeholder(), Some(NO_ITEMS_PLACEHOLDER));
    assert_eq!(
        editor.value().get("DNSServers"),
        Some(&Value::List(Vec::new()))
    );
}

#[test]
fn add_then_remove_all_returns_to_placeholder() {
    let mut editor = ObjectEditor::new(
        "dns",
        json(serde_json::json!({"DNSServers": []})),
        dns_options(),
    );
    let view = editor.render();
    editor
        .press(&view, add_action(&view, "root_DNSServers"))
        .expect("add");
    let view = editor.render();
    assert_eq!(view.group("root_DNSServers").expect("group").items().len(), 1);

    editor
        .press(&view, remove_action(&view, "root_DNSServers_0"))
        .expect("remove");
    let view = editor.render();
    assert_eq!(
        view.group("root_DNSServers").expect("group").placeholder(),
        Some(NO_ITEMS_PLACEHOLDER)
    );
}

#[test]
fn route_factory_appends_one_route_to_the_right_network() {
    let options = EditorOptions::new().with_new_button("root_Networks_Routes", |routes| {
        if let Value::List(items) = routes {
            items.push(Value::from(
                serde_json::json!({"Address": "", "Metric": "0"}),
            ));
        }
    });
    let mut editor = ObjectEditor::new(
        "networks",
        json(serde_json::json!({
            "Networks": [
                {"Tag": "n1", "Routes": [{"Address": "0.0.0.0/0", "Metric": "0"}]},
                {"Tag": "n2", "Routes": []},
            ]
        })),
        options,
    );
    let view = editor.render();
    assert_eq!(
        view.group("root_Networks_0").and_then(|g| g.title()),
        Some("n1")
    );
    editor
        .press(&view, add_action(&view, "root_Networks_0_Routes"))
        .expect("add route");

    assert_eq!(
        editor.value(),
        &json(serde_json::json!({
            "Networks": [
                {"Tag": "n1", "Routes": [
                    {"Address": "0.0.0.0/0", "Metric": "0"},
                    {"Address": "", "Metric": "0"},
                ]},
                {"Tag": "n2", "Routes": []},
            ]
        }))
    );
}

#[test]
fn repeated_renders_are_identical() {
    let mut editor = ObjectEditor::new(
        "tunnel",
        json(serde_json::json!({
            "Name": "wg0",
            "Peers": [
                {"Tag": "home", "AllowedIPs": ["10.0.0.0/8"], "Keepalive": 25},
                {"Name": "office", "Endpoint": {"Host": "vpn.example", "Port": 51820}},
            ],
            "Enabled": false,
        })),
        EditorOptions::new().with_title("root_Peers_1", "Office"),
    );
    let first = editor.render();
    let second = editor.render();
    assert_eq!(first.render_keys(), second.render_keys());
    assert_eq!(
        serde_json::to_value(&first).expect("serialize"),
        serde_json::to_value(&second).expect("serialize")
    );
    assert_eq!(
        first.group("root_Peers_1").and_then(|g| g.title()),
        Some("Office")
    );
}

#[test]
fn editing_a_leaf_changes_only_that_leaf() {
    let mut editor = ObjectEditor::new(
        "tunnel",
        json(serde_json::json!({"Peers": [{"Port": "53"}, {"Port": "54"}]})),
        EditorOptions::new(),
    );
    let view = editor.render();
    let edit = view
        .control("root_Peers_1_Port")
        .and_then(|c| c.edit)
        .expect("edit");
    editor
        .perform(&view, edit, Interaction::Text("5353".into()))
        .expect("edit");

    let view = editor.render();
    assert_eq!(
        view.control("root_Peers_1_Port").and_then(|c| c.input.clone()),
        Some(ControlInput::Text("5353".into()))
    );
    assert_eq!(
        view.control("root_Peers_0_Port").and_then(|c| c.input.clone()),
        Some(ControlInput::Text("53".into()))
    );
}

#[test]
fn removing_middle_element_shifts_later_siblings() {
    let mut editor = ObjectEditor::new(
        "dns",
        json(serde_json::json!({"DNS": ["a", "b", "c", "d"]})),
        EditorOptions::new(),
    );
    let view = editor.render();
    editor
        .press(&view, remove_action(&view, "root_DNS_1"))
        .expect("remove");

    assert_eq!(editor.value(), &json(serde_json::json!({"DNS": ["a", "c", "d"]})));
    let view = editor.render();
    let text = |key: &str| view.control(key).and_then(|c| c.input.clone());
    assert_eq!(text("root_DNS_0"), Some(ControlInput::Text("a".into())));
    assert_eq!(text("root_DNS_1"), Some(ControlInput::Text("c".into())));
    assert_eq!(text("root_DNS_2"), Some(ControlInput::Text("d".into())));
    assert!(view.control("root_DNS_3").is_none());
}

#[test]
fn tag_title_is_overridden_by_configured_title() {
    let value = serde_json::json!({"X": {"Tag": "foo", "Routes": []}});
    let mut plain = ObjectEditor::new("p", json(value.clone()), EditorOptions::new());
    assert_eq!(
        plain.render().group("root_X").and_then(|g| g.title().map(str::to_string)),
        Some("foo".to_string())
    );

    let mut titled = ObjectEditor::new(
        "p",
        json(value),
        EditorOptions::new().with_title("root_X", "Bar"),
    );
    assert_eq!(
        titled.render().group("root_X").and_then(|g| g.title().map(str::to_string)),
        Some("Bar".to_string())
    );
}

#[test]
fn configured_delete_handler_replaces_splice() {
    let options = EditorOptions::new().with_delete_button("root_Peers", |parent, segment| {
        remove_segment(parent, segment);
        if let Value::List(items) = parent {
            items.sort_by(|a, b| {
                let tag = |v: &Value| v.get("Tag").and_then(Value::to_text_scalar);
                tag(a).cmp(&tag(b))
            });
        }
    });
    let mut editor = ObjectEditor::new(
        "peers",
        json(serde_json::json!({"Peers": [{"Tag": "c"}, {"Tag": "b"}, {"Tag": "a"}]})),
        options,
    );
    let view = editor.render();
    editor
        .press(&view, remove_action(&view, "root_Peers_0"))
        .expect("delete");
    assert_eq!(
        editor.value(),
        &json(serde_json::json!({"Peers": [{"Tag": "a"}, {"Tag": "b"}]}))
    );
}

#[test]
fn number_fields_keep_their_type_even_for_garbage() {
    let mut editor = ObjectEditor::new(
        "tunnel",
        json(serde_json::json!({"MTU": 1420, "Name": "1420"})),
        EditorOptions::new(),
    );
    let rx = editor.subscribe();
    let view = editor.render();
    let mtu = view.control("root_MTU").and_then(|c| c.edit).expect("mtu");
    editor
        .perform(&view, mtu, Interaction::Text("lots".into()))
        .expect("edit mtu");
    let view = editor.render();
    let name = view.control("root_Name").and_then(|c| c.edit).expect("name");
    editor
        .perform(&view, name, Interaction::Text("1500".into()))
        .expect("edit name");

    assert!(editor.value().get("MTU").and_then(Value::as_number).is_some_and(f64::is_nan));
    assert_eq!(editor.value().get("Name"), Some(&Value::Text("1500".into())));
    let events: Vec<EditorEvent> = rx.try_iter().collect();
    assert_eq!(events.len(), 2);
    assert!(events.iter().all(EditorEvent::requests_rerender));
}

#[test]
fn yaml_options_hide_and_default_fields() {
    let options = EditorOptions::from_yaml_str(
        r#"
titles:
  root_Peers: Peers
defaults:
  root_MTU: 1420
hidden:
  "root_Peers_*Key": true
"#,
    )
    .expect("options");
    let mut editor = ObjectEditor::new(
        "tunnel",
        json(serde_json::json!({
            "MTU": null,
            "Peers": [{"Tag": "home", "PublicKey": "pk", "PresharedKey": "psk", "Endpoint": "h:1"}],
        })),
        options,
    );
    let view = editor.render();

    assert_eq!(editor.value().get("MTU"), Some(&Value::Number(1420.0)));
    assert_eq!(
        view.control("root_MTU").and_then(|c| c.input.clone()),
        Some(ControlInput::Number(1420.0))
    );
    assert!(view.control("root_Peers_0_PublicKey").is_none());
    assert!(view.control("root_Peers_0_PresharedKey").is_none());
    assert!(view.control("root_Peers_0_Endpoint").is_some());
}
