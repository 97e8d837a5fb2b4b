mod common;

// std
use std::{
	sync::{Arc, Mutex},
	time::{SystemTime, UNIX_EPOCH},
};
// self
use common::{
	FailingClearStore, ScriptedTransport, Step, config, harness, scripted, seed_credentials,
};
use pwa_auth_fetch::{
	auth::DeviceKey,
	client::ApiClient,
	config::ClientConfig,
	i18n::ids,
	nav::Navigator,
	store::{self, FileStore, MemorySessionCache, SessionValidation},
};

#[tokio::test]
async fn invalidation_wipes_every_credential_and_navigates() {
	let h = scripted([Step::Fail]);

	seed_credentials(&h.store, &h.session, "access-1", "refresh-1").await;
	h.client.device_key.set(DeviceKey::new(b"device-secret".to_vec()));
	h.client.invalidate_and_redirect(ids::SESSION_EXPIRED).await;

	assert!(h.store.is_empty());
	assert!(h.session.is_empty());
	assert!(!h.client.device_key.is_set());
	assert_eq!(h.navigator.visits(), vec!["/activate".to_owned()]);
	assert_eq!(h.transport.calls(), 0);
}

#[tokio::test]
async fn navigation_happens_even_when_store_clear_fails() {
	let h = harness(
		config("https://api.example.test"),
		ScriptedTransport::new([Step::Fail]),
		FailingClearStore::default(),
	);

	seed_credentials(&h.store, &h.session, "access-1", "refresh-1").await;
	h.client.device_key.set(DeviceKey::new(b"device-secret".to_vec()));
	h.client.invalidate_and_redirect(ids::DEVICE_REVOKED).await;

	assert!(!h.store.inner.is_empty(), "The failing store keeps its entries.");
	assert_eq!(SessionValidation::load(&h.session).expect("Session should be readable."), None);
	assert!(!h.client.device_key.is_set());
	assert_eq!(h.navigator.count(), 1);
}

#[tokio::test]
async fn invalidation_is_idempotent() {
	let h = scripted([Step::Fail]);

	seed_credentials(&h.store, &h.session, "access-1", "refresh-1").await;
	h.client.invalidate_and_redirect(ids::UNAUTHORIZED).await;
	h.client.invalidate_and_redirect(ids::UNAUTHORIZED).await;

	assert!(h.store.is_empty());
	assert_eq!(h.client.metrics.invalidations(), 2);
	assert_eq!(h.navigator.visits(), vec!["/activate".to_owned(), "/activate".to_owned()]);
}

#[tokio::test]
async fn custom_entry_path_and_closure_navigator_are_honored() {
	let visited = Arc::new(Mutex::new(Vec::<String>::new()));
	let sink = visited.clone();
	let navigator: Arc<dyn Navigator> = Arc::new(move |path: &str| {
		sink.lock().expect("Navigation log lock should not be poisoned.").push(path.to_owned());
	});
	let config = ClientConfig::builder(
		"https://api.example.test".parse().expect("Base URL fixture should parse."),
	)
	.entry_path("/welcome")
	.build()
	.expect("Config with a custom entry path should build.");
	let client = ApiClient::<ScriptedTransport>::with_transport(
		config,
		ScriptedTransport::default(),
		Arc::new(store::MemoryStore::default()),
		Arc::new(MemorySessionCache::default()),
		navigator,
	);

	client.invalidate_and_redirect(ids::TOKEN_EXPIRED).await;

	assert_eq!(
		*visited.lock().expect("Navigation log lock should not be poisoned."),
		vec!["/welcome".to_owned()]
	);
}

#[tokio::test]
async fn file_store_is_emptied_on_disk() {
	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System clock should be after the epoch.")
		.as_nanos();
	let path = std::env::temp_dir()
		.join(format!("pwa-auth-fetch-invalidate-{}-{nanos}", std::process::id()))
		.join("credentials.json");
	let file_store = FileStore::open(&path).expect("File store should open.");
	let h = harness(config("https://api.example.test"), ScriptedTransport::default(), file_store);

	seed_credentials(&h.store, &h.session, "access-1", "refresh-1").await;
	h.client.invalidate_and_redirect(ids::DEVICE_UNBOUND).await;

	let reopened = FileStore::open(&path).expect("File store should reopen.");

	assert_eq!(store::load_auth_state(&reopened).await.expect("Snapshot should decode."), None);
	assert_eq!(store::load_install_id(&reopened).await.expect("Snapshot should decode."), None);
	assert_eq!(h.navigator.count(), 1);

	if let Some(dir) = path.parent() {
		let _ = std::fs::remove_dir_all(dir);
	}
}
