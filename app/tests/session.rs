//! Session flows over `StubTransport` and a live mock server.

use blog_app::{Config, Session, StubTransport, UreqTransport};
use blog_core::{
    view, BlogClient, Completion, Field, HttpMethod, PointerEvent, Region, USER_SELECTOR,
};
use serde_json::json;

const BASE: &str = "http://stub";

fn users() -> serde_json::Value {
    json!([
        { "id": 1, "name": "Leanne Graham", "email": "Sincere@april.biz" },
        { "id": 2, "name": "Ervin Howell", "email": "Shanna@melissa.tv" },
        { "id": 3, "name": "Clementine Bauch", "email": "Nathan@yesenia.net" }
    ])
}

fn comment(id: u64, post_id: u64) -> serde_json::Value {
    json!({
        "id": id,
        "postId": post_id,
        "name": format!("Author {id}"),
        "email": format!("a{id}@example.com"),
        "body": "Text"
    })
}

/// User 1 has posts 11 and 12; post 11 has comments 5, 7, 9; post 12 has
/// none; user 3 has no posts.
fn stub() -> StubTransport {
    StubTransport::new(BASE)
        .with_json(HttpMethod::Get, "/users", 200, &users())
        .with_json(
            HttpMethod::Get,
            "/posts?userId=1",
            200,
            &json!([
                { "id": 11, "userId": 1, "title": "First", "body": "One" },
                { "id": 12, "userId": 1, "title": "Second", "body": "Two" }
            ]),
        )
        .with_json(HttpMethod::Get, "/posts?userId=3", 200, &json!([]))
        .with_response(HttpMethod::Get, "/posts?userId=2", 500, "boom")
        .with_json(
            HttpMethod::Get,
            "/comments?postId=11",
            200,
            &json!([comment(5, 11), comment(7, 11), comment(9, 11)]),
        )
        .with_json(HttpMethod::Get, "/comments?postId=12", 200, &json!([]))
        .with_json(HttpMethod::Post, "/comments", 201, &comment(31, 11))
        .with_response(HttpMethod::Delete, "/comments/7", 204, "")
        .with_response(HttpMethod::Delete, "/comments/31", 204, "")
        .with_response(HttpMethod::Delete, "/comments/9", 500, "")
}

async fn session(transport: StubTransport) -> Session<StubTransport> {
    let mut session = Session::new(BlogClient::new(BASE), transport);
    assert_eq!(session.mount().await, Completion::Applied);
    session
}

/// User 1 selected and post 11 open with its comments loaded.
async fn on_post_11() -> Session<StubTransport> {
    let mut session = session(stub()).await;
    session.select_user(1).await;
    session.choose_post(11).await;
    session
}

fn comment_ids(session: &Session<StubTransport>) -> Vec<u64> {
    view::details_panel(session.dashboard().details().unwrap())
        .comments
        .iter()
        .map(|c| c.id)
        .collect()
}

#[tokio::test]
async fn session_built_from_environment_uses_configured_base() {
    std::env::set_var("BLOG_API_BASE_URL", format!("{BASE}/"));
    let config = Config::from_env().unwrap();
    assert_eq!(config.api_base_url, "http://stub/");

    let mut session = Session::from_config(&config, stub());
    assert_eq!(session.mount().await, Completion::Applied);
    session.select_user(1).await;

    assert_eq!(session.transport().count(HttpMethod::Get, "/users"), 1);
    let panel = view::main_panel(session.dashboard());
    assert_eq!(panel.posts.len(), 2);
}

#[tokio::test]
async fn user_without_posts_shows_no_posts_yet() {
    let mut session = session(stub()).await;
    session.select_user(3).await;

    let panel = view::main_panel(session.dashboard());
    assert!(panel.no_posts);
    assert!(panel.error.is_none());
    assert!(!panel.no_user_selected);
}

#[tokio::test]
async fn post_fetch_failure_shows_only_the_error() {
    let mut session = session(stub()).await;
    session.select_user(2).await;

    let panel = view::main_panel(session.dashboard());
    assert_eq!(panel.error, Some(view::POSTS_LOADING_ERROR));
    assert!(!panel.loader);
    assert!(panel.posts.is_empty());
}

#[tokio::test]
async fn transport_failure_on_posts_is_the_same_error() {
    let transport = stub().with_failure(HttpMethod::Get, "/posts?userId=1");
    let mut session = session(transport).await;
    session.select_user(1).await;

    let panel = view::main_panel(session.dashboard());
    assert_eq!(panel.error, Some(view::POSTS_LOADING_ERROR));
}

#[tokio::test]
async fn switching_posts_fetches_comments_once_for_the_new_post() {
    let mut session = on_post_11().await;
    session.open_comment_form();
    session.choose_post(12).await;

    let transport = session.transport();
    assert_eq!(transport.count(HttpMethod::Get, "/comments?postId=12"), 1);
    let panel = view::details_panel(session.dashboard().details().unwrap());
    assert!(panel.form.is_none());
    assert!(panel.no_comments);
    assert!(panel.comments.is_empty());
}

#[tokio::test]
async fn invalid_form_makes_no_create_call() {
    let mut session = on_post_11().await;
    session.open_comment_form();
    session.edit_comment(Field::Email, "x@y.com");
    session.edit_comment(Field::Body, "hi");

    assert!(session.submit_comment().await.is_none());
    assert_eq!(session.transport().count(HttpMethod::Post, "/comments"), 0);

    let form = view::details_panel(session.dashboard().details().unwrap())
        .form
        .unwrap();
    let errors: Vec<bool> = form.fields.iter().map(|f| f.error.is_some()).collect();
    assert_eq!(errors, vec![true, false, false]);
    let values: Vec<&str> = form.fields.iter().map(|f| f.value.as_str()).collect();
    assert_eq!(values, vec!["", "x@y.com", "hi"]);
}

#[tokio::test]
async fn valid_form_creates_once_and_appends_without_refetch() {
    let mut session = on_post_11().await;
    session.open_comment_form();
    session.edit_comment(Field::Name, "Ann");
    session.edit_comment(Field::Email, "ann@example.com");
    session.edit_comment(Field::Body, "Nice post");

    assert_eq!(session.submit_comment().await, Some(Completion::Applied));

    let transport = session.transport();
    let creates: Vec<_> = transport
        .requests()
        .into_iter()
        .filter(|r| r.method == HttpMethod::Post)
        .collect();
    assert_eq!(creates.len(), 1);
    let body: serde_json::Value =
        serde_json::from_str(creates[0].body.as_deref().unwrap()).unwrap();
    assert_eq!(
        body,
        json!({ "name": "Ann", "email": "ann@example.com", "body": "Nice post", "postId": 11 })
    );
    assert_eq!(transport.count(HttpMethod::Get, "/comments?postId=11"), 1);

    assert_eq!(comment_ids(&session), vec![5, 7, 9, 31]);
    let form = view::details_panel(session.dashboard().details().unwrap())
        .form
        .unwrap();
    assert!(form.fields.iter().all(|f| f.value.is_empty() && f.error.is_none()));
    assert!(!form.busy);
}

#[tokio::test]
async fn delete_removes_only_the_deleted_comment() {
    let mut session = on_post_11().await;
    assert_eq!(session.delete_comment(7).await, Some(Completion::Applied));
    assert_eq!(comment_ids(&session), vec![5, 9]);
}

#[tokio::test]
async fn failed_delete_is_reported() {
    let mut session = on_post_11().await;
    session.delete_comment(9).await;

    let panel = view::details_panel(session.dashboard().details().unwrap());
    assert_eq!(panel.delete_error, Some(view::COMMENT_DELETE_ERROR));
    assert_eq!(comment_ids(&session), vec![5, 7, 9]);
}

#[tokio::test]
async fn create_then_delete_leaves_list_unchanged() {
    let mut session = on_post_11().await;
    let before = comment_ids(&session);

    session.open_comment_form();
    session.edit_comment(Field::Name, "Ann");
    session.edit_comment(Field::Email, "ann@example.com");
    session.edit_comment(Field::Body, "Temporary");
    session.submit_comment().await;
    session.delete_comment(31).await;

    assert_eq!(comment_ids(&session), before);
}

#[tokio::test]
async fn out_of_order_post_responses_keep_latest_user() {
    let mut session = session(stub()).await;
    let first = session.dashboard_mut().select_user(1).unwrap();
    let second = session.dashboard_mut().select_user(3).unwrap();

    let (first_result, second_result) =
        tokio::join!(session.dispatch(&first), session.dispatch(&second));
    assert_eq!(session.complete(second, second_result), Completion::Applied);
    assert_eq!(session.complete(first, first_result), Completion::Stale);

    assert_eq!(session.dashboard().selection().user().map(|u| u.id), Some(3));
    assert!(view::main_panel(session.dashboard()).no_posts);
}

#[tokio::test]
async fn click_outside_closes_user_menu() {
    let mut session = session(stub()).await;
    session.toggle_user_menu();
    session.click(PointerEvent::on([Region("dropdown-item"), USER_SELECTOR]));
    assert!(session.dashboard().users().is_open());

    session.click(PointerEvent::on([Region("sidebar")]));
    assert!(!session.dashboard().users().is_open());
    assert_eq!(session.dashboard().pointer_bus().subscriber_count(), 0);
}

#[tokio::test]
async fn deselecting_user_shows_placeholder() {
    let mut session = on_post_11().await;
    session.deselect_user();

    let panel = view::main_panel(session.dashboard());
    assert!(panel.no_user_selected);
    assert!(panel.posts.is_empty());
    assert!(!panel.sidebar_open);
}

// ---------------------------------------------------------------------------
// Live mock server
// ---------------------------------------------------------------------------

fn start_server(store: mock_server::Store) -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run_with(listener, store).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

#[tokio::test]
async fn live_server_comment_round_trip() {
    let base = start_server(mock_server::Store::seeded());
    let mut session = Session::new(BlogClient::new(&base), UreqTransport::default());

    session.mount().await;
    session.select_user(1).await;
    session.choose_post(1).await;
    let before: Vec<u64> = view::details_panel(session.dashboard().details().unwrap())
        .comments
        .iter()
        .map(|c| c.id)
        .collect();
    assert_eq!(before, vec![1, 2]);

    session.open_comment_form();
    session.edit_comment(Field::Name, "Live");
    session.edit_comment(Field::Email, "live@example.com");
    session.edit_comment(Field::Body, "Over the wire");
    assert_eq!(session.submit_comment().await, Some(Completion::Applied));

    let created = view::details_panel(session.dashboard().details().unwrap())
        .comments
        .last()
        .map(|c| c.id)
        .unwrap();
    assert_eq!(created, 4);

    session.delete_comment(created).await;
    let after: Vec<u64> = view::details_panel(session.dashboard().details().unwrap())
        .comments
        .iter()
        .map(|c| c.id)
        .collect();
    assert_eq!(after, before);
}

#[tokio::test]
async fn live_server_failing_comments_shows_error() {
    let mut store = mock_server::Store::seeded();
    store.fail_comments = true;
    let base = start_server(store);
    let mut session = Session::new(BlogClient::new(&base), UreqTransport::default());

    session.mount().await;
    session.select_user(1).await;
    session.choose_post(1).await;

    let panel = view::details_panel(session.dashboard().details().unwrap());
    assert_eq!(panel.error, Some(view::COMMENTS_ERROR));
    assert!(!panel.loader);
    assert!(panel.write_button);
}
