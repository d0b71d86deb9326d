mod common;

use std::sync::Mutex;

use letterbox::libs::client::api::{ClientError, HttpMailApi, MailApi};
use letterbox::libs::client::auth::{
    Auth, AuthError, LocalUser, RegistrationForm, SessionUser, SESSION_KEY, USERS_KEY,
};
use letterbox::libs::client::kv_store::{JsonFileStore, KeyValueStore, MemoryStore};
use letterbox::libs::client::wizard::{
    LetterDraft, Notice, Page, Party, PaymentForm, Wizard, PAYMENT_CONFIRMED,
};
use letterbox::libs::core::models::LetterFileName;
use letterbox::libs::models::{MailSaved, MailSubmission};
use letterbox::libs::storage::lib_sqlite_impl::load_letters;
use tokio::net::TcpListener;

use crate::common::*;

/// Records submissions instead of sending them.
#[derive(Default)]
struct RecordingApi {
    sent: Mutex<Vec<MailSubmission>>,
    reject: bool,
}

impl MailApi for RecordingApi {
    async fn submit_mail(&self, submission: &MailSubmission) -> Result<MailSaved, ClientError> {
        if self.reject {
            return Err(ClientError::Rejected {
                status: 500,
                error: Some("Ошибка сервера".to_string()),
            });
        }
        self.sent.lock().unwrap().push(submission.clone());
        Ok(MailSaved::new(LetterFileName::from_millis(1)))
    }
}

fn anna_form() -> RegistrationForm {
    RegistrationForm {
        name: "Anna".to_string(),
        login: "anna".to_string(),
        password: "secret".to_string(),
    }
}

fn complete_draft() -> LetterDraft {
    LetterDraft {
        from: Party {
            first: "Ivan".into(),
            last: "Petrov".into(),
            middle: "Ivanovich".into(),
            address: "Moscow".into(),
        },
        to: Party {
            first: "Anna".into(),
            last: "Smith".into(),
            middle: "Maria".into(),
            address: "Boston".into(),
        },
        body: "Hello".into(),
        image_name: "postcard.png".into(),
    }
}

fn card() -> PaymentForm {
    PaymentForm {
        card_number: "0000 0000 0000 0000".into(),
        expiry: "12/34".into(),
        cvv: "123".into(),
        holder: "IVAN IVANOV".into(),
    }
}

fn logged_in_wizard<A: MailApi>(api: A) -> Wizard<MemoryStore, A> {
    let mut wizard = Wizard::new(Auth::new(MemoryStore::new()).unwrap(), api);
    wizard.open("/register");
    wizard.register(anna_form());
    assert_eq!(wizard.page(), &Page::Compose);
    wizard
}

#[test]
fn test_register_then_login() {
    let mut auth = Auth::new(MemoryStore::new()).unwrap();

    let session = auth.register(anna_form()).expect("Registration should succeed");
    assert_eq!(session.display_name(), "Anna");

    auth.logout().unwrap();
    assert_eq!(auth.user(), None);
    assert_eq!(auth.store().get(SESSION_KEY).unwrap(), None);

    let session = auth.login("  anna ", "secret\n").expect("Login should succeed");
    assert_eq!(
        session,
        &SessionUser {
            login: "anna".into(),
            name: "Anna".into()
        }
    );
}

#[test]
fn test_taken_login_changes_nothing() {
    let mut auth = Auth::new(MemoryStore::new()).unwrap();
    auth.register(anna_form()).unwrap();
    auth.logout().unwrap();
    let users_before = auth.store().get(USERS_KEY).unwrap();

    let err = auth
        .register(RegistrationForm {
            name: "Other Anna".into(),
            ..anna_form()
        })
        .unwrap_err();

    assert!(matches!(err, AuthError::LoginTaken));
    assert_eq!(err.to_string(), "Логин уже занят");
    assert_eq!(auth.store().get(USERS_KEY).unwrap(), users_before);
    assert_eq!(auth.user(), None);
    assert_eq!(auth.store().get(SESSION_KEY).unwrap(), None);
}

#[test]
fn test_wrong_password_leaves_session_unset() {
    let mut store = MemoryStore::new();
    let users = vec![LocalUser {
        login: "anna".into(),
        name: "Anna".into(),
        password: "secret".into(),
    }];
    store
        .set(USERS_KEY, serde_json::to_string(&users).unwrap())
        .unwrap();

    let mut wizard = Wizard::new(Auth::new(store).unwrap(), RecordingApi::default());
    wizard.login("anna", "wrong");

    assert_eq!(wizard.page(), &Page::Login);
    assert_eq!(wizard.user(), None);
    assert_eq!(
        wizard.notice(),
        Some(&Notice::Error("Неверный логин или пароль".into()))
    );
    assert_eq!(wizard.auth().store().get(SESSION_KEY).unwrap(), None);
}

#[test]
fn test_session_is_rehydrated_from_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("local_storage.json");

    let mut auth = Auth::new(JsonFileStore::new(&path)).unwrap();
    auth.register(anna_form()).unwrap();
    drop(auth);

    let mut wizard = Wizard::new(
        Auth::new(JsonFileStore::new(&path)).unwrap(),
        RecordingApi::default(),
    );
    assert_eq!(wizard.profile_name(), Some("Anna"));

    wizard.open("/profile");
    assert_eq!(wizard.page(), &Page::Profile);

    wizard.logout();
    let fresh = Auth::new(JsonFileStore::new(&path)).unwrap();
    assert_eq!(fresh.user(), None);
    assert_eq!(fresh.users().unwrap().len(), 1);
}

#[test]
fn test_pages_behind_session_redirect_to_login() {
    let mut wizard = Wizard::new(
        Auth::new(MemoryStore::new()).unwrap(),
        RecordingApi::default(),
    );

    for path in ["/compose", "/payment", "/profile", "/nowhere"] {
        wizard.open(path);
        assert_eq!(wizard.page(), &Page::Login, "{path}");
    }
}

#[test]
fn test_incomplete_draft_stays_on_compose() {
    let mut wizard = logged_in_wizard(RecordingApi::default());

    let mut draft = complete_draft();
    draft.to.middle.clear();
    assert!(!wizard.proceed_to_payment(draft));

    let mut draft = complete_draft();
    draft.body = "   ".into();
    assert!(!wizard.proceed_to_payment(draft));

    assert_eq!(wizard.page(), &Page::Compose);
}

#[tokio::test]
async fn test_payment_submits_draft_and_returns_to_compose() {
    let mut wizard = logged_in_wizard(RecordingApi::default());

    assert!(wizard.proceed_to_payment(complete_draft()));
    assert_eq!(wizard.page(), &Page::Payment(complete_draft()));

    // blank card fields block the submit, like the browser's required check
    wizard.pay(&PaymentForm::default()).await;
    assert!(matches!(wizard.page(), Page::Payment(_)));

    assert!(wizard.api().sent.lock().unwrap().is_empty());

    wizard.pay(&card()).await;

    assert_eq!(wizard.page(), &Page::Compose);
    assert_eq!(
        wizard.notice(),
        Some(&Notice::Confirmation(PAYMENT_CONFIRMED.into()))
    );
    let sent = wizard.api().sent.lock().unwrap();
    assert_eq!(sent.as_slice(), &[complete_draft().to_submission()]);
}

#[tokio::test]
async fn test_failed_submission_stays_on_payment() {
    let api = RecordingApi {
        reject: true,
        ..Default::default()
    };
    let mut wizard = logged_in_wizard(api);
    wizard.proceed_to_payment(complete_draft());

    wizard.pay(&card()).await;

    assert_eq!(wizard.page(), &Page::Payment(complete_draft()));
    assert_eq!(
        wizard.notice(),
        Some(&Notice::Error("Ошибка: Ошибка сохранения письма".into()))
    );
}

#[tokio::test]
async fn test_reload_drops_draft() {
    let mut wizard = logged_in_wizard(RecordingApi::default());
    wizard.proceed_to_payment(complete_draft());

    wizard.open("/payment");

    assert_eq!(wizard.page(), &Page::Compose);
}

#[tokio::test]
async fn test_wizard_delivers_letter_to_running_server() {
    let env = setup();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    let app = env.router();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let mut wizard = logged_in_wizard(HttpMailApi::new(format!("http://{address}")));
    wizard.proceed_to_payment(complete_draft());
    wizard.pay(&card()).await;

    assert_eq!(
        wizard.notice(),
        Some(&Notice::Confirmation(PAYMENT_CONFIRMED.into()))
    );

    let mails = load_letters(&env.state.store).unwrap();
    assert_eq!(mails.len(), 1);
    assert_eq!(mails[0].sender_middle, "Ivanovich");
    assert_eq!(mails[0].recipient_address, "Boston");
    assert_eq!(
        env.state.letters.read_letter(&mails[0].file_name).unwrap(),
        "Hello"
    );
}

#[tokio::test]
async fn test_http_client_reports_rejection() {
    let env = setup();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    let app = env.router();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let api = HttpMailApi::new(format!("http://{address}/"));
    let err = api
        .submit_mail(&MailSubmission::default())
        .await
        .unwrap_err();

    match err {
        ClientError::Rejected { status, error } => {
            assert_eq!(status, 400);
            assert_eq!(error.as_deref(), Some("Не все поля заполнены"));
        }
        other => panic!("unexpected error: {other}"),
    }
}
