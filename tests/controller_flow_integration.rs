mod support;

use support::http_server::MockServer;
use support::silibus_env::SilibusEnvGuard;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use silibus::app_dirs::APP_DIR_NAME;
use silibus::assist::ApiKeyStore;
use silibus::config::{self, AppConfig};
use silibus::egui_app::controller::EguiController;
use silibus::school::ClassId;
use std::time::Duration;
use tempfile::TempDir;

const CLASSES_BODY: &str = r#"[{"id":"c1","name":"4 Amanah","year":"4"}]"#;
const GENERATE_PATH: &str = "/v1beta/models/gemini-3-flash-preview:generateContent";

/// Controller wired to scripted school and assist servers, with config and
/// key storage redirected into a temp directory.
struct ControllerHarness {
    _env: SilibusEnvGuard,
    _temp: TempDir,
    school: MockServer,
    assist: MockServer,
    controller: EguiController,
}

impl ControllerHarness {
    fn new() -> Self {
        let temp = tempfile::tempdir().expect("create temp dir");
        let env = SilibusEnvGuard::set_config_home(temp.path().to_path_buf());
        let school = MockServer::start();
        let assist = MockServer::start();

        let config = AppConfig {
            backend_base_url: school.base_url.clone(),
            assist_base_url: assist.base_url.clone(),
            ..AppConfig::default()
        };
        let config_path = temp
            .path()
            .join(APP_DIR_NAME)
            .join(config::CONFIG_FILE_NAME);
        config::save_to_path(&config, &config_path).expect("write config");

        let controller = EguiController::new().expect("create controller");
        Self {
            _env: env,
            _temp: temp,
            school,
            assist,
            controller,
        }
    }

    /// Harness with class `c1` and subject `s1` ("Sains") already open, so
    /// item flows can start immediately.
    fn with_open_subject() -> Self {
        let mut harness = Self::new();
        harness.school.enqueue("GET", "/api/classes", 200, CLASSES_BODY);
        harness.school.enqueue(
            "GET",
            "/api/classes/c1/subjects",
            200,
            r#"[{"id":"s1","class_id":"c1","name":"Sains"}]"#,
        );
        harness
            .school
            .enqueue("GET", "/api/subjects/s1/dskp", 200, "[]");

        harness.controller.startup();
        harness.wait_for("class list", |c| !c.ui.classes.rows.is_empty());
        harness.controller.select_class(Some(ClassId::from("c1")));
        harness.wait_for("subject list", |c| !c.ui.subjects.rows.is_empty());
        let subject_id = harness.controller.ui.subjects.rows[0].id.clone();
        harness.controller.select_subject(Some(subject_id));
        harness.wait_for("item list", |c| !c.ui.items.loading);
        harness
    }

    fn store_api_key(&self, key: &str) {
        let store = ApiKeyStore::new().expect("create key store");
        store.set(key).expect("store api key");
    }

    fn wait_for(&mut self, what: &str, done: impl Fn(&EguiController) -> bool) {
        wait_until(&mut self.controller, what, done);
    }
}

fn wait_until(
    controller: &mut EguiController,
    what: &str,
    done: impl Fn(&EguiController) -> bool,
) {
    for _ in 0..400 {
        controller.poll_background_jobs();
        if done(controller) {
            return;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    panic!("timed out waiting for {what}");
}

/// Gemini response whose model text is a JSON array of SK/SP drafts.
fn drafts_response(pairs: &[(&str, &str)]) -> String {
    let drafts: Vec<serde_json::Value> = pairs
        .iter()
        .map(|(sk, sp)| serde_json::json!({ "sk": sk, "sp": sp }))
        .collect();
    let text = serde_json::Value::Array(drafts).to_string();
    serde_json::json!({
        "candidates": [{ "content": { "parts": [{ "text": text }] } }]
    })
    .to_string()
}

#[test]
fn startup_loads_classes_into_the_picker() {
    let mut harness = ControllerHarness::new();
    harness.school.enqueue("GET", "/api/classes", 200, CLASSES_BODY);

    harness.controller.startup();
    harness.wait_for("class list", |c| !c.ui.classes.loading);

    let classes = &harness.controller.ui.classes;
    assert_eq!(classes.rows.len(), 1);
    assert_eq!(classes.rows[0].label, "4 Amanah (Year 4)");
    assert!(classes.selected.is_none());
    assert!(harness.controller.ui.status.text.contains("Loaded 1 classes"));
}

#[test]
fn class_load_failure_reaches_the_status_bar() {
    let mut harness = ControllerHarness::new();
    harness
        .school
        .enqueue("GET", "/api/classes", 500, "database down");

    harness.controller.startup();
    harness.wait_for("load failure", |c| !c.ui.classes.loading);

    assert!(harness.controller.ui.classes.rows.is_empty());
    assert_eq!(harness.controller.ui.status.badge_label, "Error");
    assert!(
        harness
            .controller
            .ui
            .status
            .text
            .contains("Failed to load classes")
    );
    assert!(harness.controller.ui.status.text.contains("database down"));
}

#[test]
fn adding_a_subject_selects_it_and_shows_the_empty_item_state() {
    let mut harness = ControllerHarness::new();
    harness.school.enqueue("GET", "/api/classes", 200, CLASSES_BODY);
    harness
        .school
        .enqueue("GET", "/api/classes/c1/subjects", 200, "[]");
    harness.school.enqueue(
        "POST",
        "/api/classes/c1/subjects",
        201,
        r#"{"id":"s1"}"#,
    );
    harness
        .school
        .enqueue("GET", "/api/subjects/s1/dskp", 200, "[]");

    harness.controller.startup();
    harness.wait_for("class list", |c| !c.ui.classes.rows.is_empty());
    harness.controller.select_class(Some(ClassId::from("c1")));
    harness.wait_for("subject list", |c| !c.ui.subjects.loading);
    assert!(harness.controller.ui.subjects.rows.is_empty());

    harness.controller.ui.subjects.name_input = "Math".to_string();
    harness.controller.add_subject();
    harness.wait_for("subject create", |c| {
        !c.ui.subjects.rows.is_empty() && !c.ui.items.loading
    });

    let subjects = &harness.controller.ui.subjects;
    assert_eq!(subjects.rows.len(), 1);
    assert_eq!(subjects.rows[0].name, "Math");
    assert!(subjects.rows[0].selected);
    assert!(subjects.name_input.is_empty());
    assert_eq!(
        harness.controller.ui.items.subject_label.as_deref(),
        Some("Math")
    );
    assert!(harness.controller.ui.items.rows.is_empty());

    let creates = harness.school.requests_for("POST", "/api/classes/c1/subjects");
    assert_eq!(creates.len(), 1);
    let body: serde_json::Value =
        serde_json::from_str(&creates[0].body).expect("create body is JSON");
    assert_eq!(body["name"], "Math");
}

#[test]
fn importing_a_document_persists_extracted_items_in_order() {
    let mut harness = ControllerHarness::with_open_subject();
    harness.store_api_key("test-key-123");
    let doc_dir = tempfile::tempdir().expect("create document dir");
    let doc_path = doc_dir.path().join("sains-tahun-4.pdf");
    let doc_bytes = b"%PDF-1.4 fixture bytes";
    std::fs::write(&doc_path, doc_bytes).expect("write fixture document");

    harness.assist.enqueue(
        "POST",
        GENERATE_PATH,
        200,
        &drafts_response(&[
            ("1.1 Kemahiran saintifik", "1.1.1 Memerhati dengan teliti"),
            ("2.1 Benda hidup", "2.1.1 Mengelas haiwan mengikut ciri"),
        ]),
    );
    harness
        .school
        .enqueue("POST", "/api/subjects/s1/dskp", 201, r#"{"id":"d1"}"#);
    harness
        .school
        .enqueue("POST", "/api/subjects/s1/dskp", 201, r#"{"id":"d2"}"#);
    harness.school.enqueue(
        "GET",
        "/api/subjects/s1/dskp",
        200,
        r#"[
            {"id":"d1","subject_id":"s1","sk":"1.1 Kemahiran saintifik","sp":"1.1.1 Memerhati dengan teliti"},
            {"id":"d2","subject_id":"s1","sk":"2.1 Benda hidup","sp":"2.1.1 Mengelas haiwan mengikut ciri"}
        ]"#,
    );

    harness.controller.import_document_from_path(doc_path);
    assert!(harness.controller.ui.items.importing);
    harness.wait_for("import", |c| !c.ui.items.importing);

    // The document bytes travel inline, base64-encoded.
    let extractions = harness.assist.requests_for("POST", GENERATE_PATH);
    assert_eq!(extractions.len(), 1);
    let extraction: serde_json::Value =
        serde_json::from_str(&extractions[0].body).expect("extraction body");
    let inline = &extraction["contents"][0]["parts"][1]["inlineData"];
    assert_eq!(inline["mimeType"], "application/pdf");
    assert_eq!(inline["data"], BASE64.encode(doc_bytes));

    let posts = harness.school.requests_for("POST", "/api/subjects/s1/dskp");
    assert_eq!(posts.len(), 2);
    let first: serde_json::Value =
        serde_json::from_str(&posts[0].body).expect("first create body");
    let second: serde_json::Value =
        serde_json::from_str(&posts[1].body).expect("second create body");
    assert_eq!(first["sk"], "1.1 Kemahiran saintifik");
    assert_eq!(second["sk"], "2.1 Benda hidup");

    // One fetch when the subject opened, exactly one reload after the batch.
    let fetches = harness.school.requests_for("GET", "/api/subjects/s1/dskp");
    assert_eq!(fetches.len(), 2);

    assert_eq!(harness.controller.ui.items.rows.len(), 2);
    assert_eq!(harness.controller.ui.status.badge_label, "Done");
    assert!(
        harness
            .controller
            .ui
            .status
            .text
            .contains("Imported 2 item(s)")
    );
}

#[test]
fn commit_persists_only_selected_suggestions_in_display_order() {
    let mut harness = ControllerHarness::with_open_subject();
    harness.store_api_key("test-key-123");
    harness.assist.enqueue(
        "POST",
        GENERATE_PATH,
        200,
        &drafts_response(&[
            ("1.1 Kemahiran mendengar", "1.1.1 Mendengar dan memberi respons"),
            ("2.1 Kemahiran bertutur", "2.1.1 Bertutur dengan sebutan betul"),
            ("3.1 Kemahiran membaca", "3.1.1 Membaca dengan kefahaman"),
        ]),
    );
    harness
        .school
        .enqueue("POST", "/api/subjects/s1/dskp", 201, r#"{"id":"d1"}"#);
    harness
        .school
        .enqueue("POST", "/api/subjects/s1/dskp", 201, r#"{"id":"d2"}"#);
    harness.school.enqueue(
        "GET",
        "/api/subjects/s1/dskp",
        200,
        r#"[
            {"id":"d1","subject_id":"s1","sk":"1.1 Kemahiran mendengar","sp":"1.1.1 Mendengar dan memberi respons"},
            {"id":"d2","subject_id":"s1","sk":"3.1 Kemahiran membaca","sp":"3.1.1 Membaca dengan kefahaman"}
        ]"#,
    );

    harness.controller.request_suggestions();
    harness.wait_for("suggestions modal", |c| c.ui.suggestions.open);
    {
        let suggestions = &harness.controller.ui.suggestions;
        assert_eq!(suggestions.rows.len(), 3);
        assert!(suggestions.rows.iter().all(|row| row.selected));
        assert_eq!(suggestions.subject_label, "Sains");
        assert_eq!(suggestions.year_label, "4");
    }

    harness.controller.toggle_suggestion(1);
    assert_eq!(harness.controller.ui.suggestions.selected_count(), 2);

    harness.controller.commit_selected_suggestions();
    harness.wait_for("commit", |c| {
        !c.ui.suggestions.open && !c.ui.suggestions.committing
    });

    let posts = harness.school.requests_for("POST", "/api/subjects/s1/dskp");
    assert_eq!(posts.len(), 2);
    let first: serde_json::Value =
        serde_json::from_str(&posts[0].body).expect("first create body");
    let second: serde_json::Value =
        serde_json::from_str(&posts[1].body).expect("second create body");
    assert_eq!(first["sk"], "1.1 Kemahiran mendengar");
    assert_eq!(second["sk"], "3.1 Kemahiran membaca");

    // One fetch when the subject opened, exactly one reload after the batch.
    let fetches = harness.school.requests_for("GET", "/api/subjects/s1/dskp");
    assert_eq!(fetches.len(), 2);

    assert_eq!(harness.controller.ui.items.rows.len(), 2);
    assert_eq!(harness.controller.ui.status.badge_label, "Done");
    assert!(harness.controller.ui.status.text.contains("Added 2 item(s)"));
}

#[test]
fn mid_batch_failure_stops_posting_and_still_reloads_once() {
    let mut harness = ControllerHarness::with_open_subject();
    harness.store_api_key("test-key-123");
    harness.assist.enqueue(
        "POST",
        GENERATE_PATH,
        200,
        &drafts_response(&[
            ("1.1 Nombor bulat", "1.1.1 Membilang secara tertib"),
            ("1.2 Operasi asas", "1.2.1 Menambah dalam lingkungan 10000"),
            ("1.3 Pecahan", "1.3.1 Menama pecahan wajar"),
        ]),
    );
    harness
        .school
        .enqueue("POST", "/api/subjects/s1/dskp", 201, r#"{"id":"d1"}"#);
    harness
        .school
        .enqueue("POST", "/api/subjects/s1/dskp", 500, "boom");
    harness.school.enqueue(
        "GET",
        "/api/subjects/s1/dskp",
        200,
        r#"[{"id":"d1","subject_id":"s1","sk":"1.1 Nombor bulat","sp":"1.1.1 Membilang secara tertib"}]"#,
    );

    harness.controller.request_suggestions();
    harness.wait_for("suggestions modal", |c| c.ui.suggestions.open);
    harness.controller.commit_selected_suggestions();
    harness.wait_for("commit", |c| {
        !c.ui.suggestions.open && !c.ui.suggestions.committing
    });

    // The third draft is never attempted once the second create fails.
    let posts = harness.school.requests_for("POST", "/api/subjects/s1/dskp");
    assert_eq!(posts.len(), 2);
    let fetches = harness.school.requests_for("GET", "/api/subjects/s1/dskp");
    assert_eq!(fetches.len(), 2);

    assert_eq!(harness.controller.ui.items.rows.len(), 1);
    assert_eq!(harness.controller.ui.status.badge_label, "Error");
    assert!(
        harness
            .controller
            .ui
            .status
            .text
            .contains("Added 1 item(s) before an error")
    );
}

#[test]
fn empty_suggestion_text_warns_without_opening_the_modal() {
    let mut harness = ControllerHarness::with_open_subject();
    harness.store_api_key("test-key-123");
    harness
        .assist
        .enqueue("POST", GENERATE_PATH, 200, &drafts_response(&[]));

    harness.controller.request_suggestions();
    harness.wait_for("suggestion response", |c| !c.ui.suggestions.requesting);

    assert!(!harness.controller.ui.suggestions.open);
    assert_eq!(harness.controller.ui.status.badge_label, "Warning");
    assert!(
        harness
            .controller
            .ui
            .status
            .text
            .contains("No suggestions returned")
    );
}

#[test]
fn suggestions_without_a_key_open_the_key_modal() {
    let mut harness = ControllerHarness::with_open_subject();

    harness.controller.request_suggestions();

    assert!(harness.controller.ui.api_key.open);
    assert!(!harness.controller.ui.suggestions.requesting);
    assert_eq!(harness.controller.ui.status.badge_label, "Warning");
    assert!(harness.assist.requests().is_empty());
}

#[test]
fn api_key_save_round_trips_through_the_store() {
    let mut harness = ControllerHarness::new();

    harness.controller.open_api_key_modal();
    assert!(harness.controller.ui.api_key.open);
    assert!(!harness.controller.ui.api_key.has_key);

    harness.controller.ui.api_key.input = "AIzaSyTest".to_string();
    harness.controller.save_api_key();
    assert!(!harness.controller.ui.api_key.open);
    assert!(harness.controller.ui.api_key.has_key);
    let store = ApiKeyStore::new().expect("create key store");
    assert_eq!(store.get().expect("read key"), Some("AIzaSyTest".to_string()));

    harness.controller.remove_api_key();
    assert!(!harness.controller.ui.api_key.has_key);
    assert_eq!(store.get().expect("read key"), None);
}

#[test]
fn selected_class_persists_across_launches() {
    let mut harness = ControllerHarness::new();
    harness.school.enqueue("GET", "/api/classes", 200, CLASSES_BODY);
    harness
        .school
        .enqueue("GET", "/api/classes/c1/subjects", 200, "[]");

    harness.controller.startup();
    harness.wait_for("class list", |c| !c.ui.classes.rows.is_empty());
    harness.controller.select_class(Some(ClassId::from("c1")));
    harness.wait_for("subject list", |c| !c.ui.subjects.loading);

    let mut second = EguiController::new().expect("create second controller");
    second.startup();
    wait_until(&mut second, "restored selection", |c| {
        c.ui.classes.selected.is_some() && !c.ui.subjects.loading
    });

    assert_eq!(second.ui.classes.selected, Some(ClassId::from("c1")));
    assert_eq!(second.ui.classes.selected_label(), Some("4 Amanah (Year 4)"));
}

#[test]
fn rapid_class_switch_keeps_only_the_latest_subjects() {
    let mut harness = ControllerHarness::new();
    harness.school.enqueue(
        "GET",
        "/api/classes",
        200,
        r#"[
            {"id":"c1","name":"4 Amanah","year":"4"},
            {"id":"c2","name":"5 Bestari","year":"5"}
        ]"#,
    );
    harness.school.enqueue(
        "GET",
        "/api/classes/c1/subjects",
        200,
        r#"[{"id":"s1","class_id":"c1","name":"BM"}]"#,
    );
    harness.school.enqueue(
        "GET",
        "/api/classes/c2/subjects",
        200,
        r#"[{"id":"s2","class_id":"c2","name":"Sejarah"}]"#,
    );

    harness.controller.startup();
    harness.wait_for("class list", |c| !c.ui.classes.rows.is_empty());
    harness.controller.select_class(Some(ClassId::from("c1")));
    harness.controller.select_class(Some(ClassId::from("c2")));
    harness.wait_for("subject list", |c| {
        !c.ui.subjects.loading && !c.ui.subjects.rows.is_empty()
    });

    // Give the superseded c1 response time to arrive, then confirm it is
    // dropped instead of overwriting the c2 list.
    std::thread::sleep(Duration::from_millis(50));
    harness.controller.poll_background_jobs();

    let subjects = &harness.controller.ui.subjects;
    assert_eq!(subjects.rows.len(), 1);
    assert_eq!(subjects.rows[0].name, "Sejarah");
}
