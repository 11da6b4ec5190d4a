use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use std::net::TcpListener;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

struct TestServer {
    base_url: String,
    child: Child,
    site_dir: PathBuf,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        #[cfg(unix)]
        cleanup::release(self.child.id());
        let _ = self.child.kill();
        let _ = self.child.wait();
        let _ = std::fs::remove_dir_all(&self.site_dir);
    }
}

static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

// The shared server lives in a static and is never dropped, so its process
// and fixture directory are torn down at exit instead.
#[cfg(unix)]
mod cleanup {
    use std::path::PathBuf;
    use std::sync::{Mutex, Once};

    static REGISTER: Once = Once::new();
    static SPAWNED: Mutex<Vec<(i32, PathBuf)>> = Mutex::new(Vec::new());

    pub fn register(pid: u32, site_dir: PathBuf) {
        if let Ok(mut spawned) = SPAWNED.lock() {
            spawned.push((pid as i32, site_dir));
        }
        REGISTER.call_once(|| unsafe {
            libc::atexit(on_exit);
        });
    }

    pub fn release(pid: u32) {
        if let Ok(mut spawned) = SPAWNED.lock() {
            spawned.retain(|(known, _)| *known != pid as i32);
        }
    }

    extern "C" fn on_exit() {
        let Ok(spawned) = SPAWNED.lock() else {
            return;
        };
        for (pid, site_dir) in spawned.iter() {
            if *pid > 0 {
                unsafe {
                    libc::kill(*pid, libc::SIGTERM);
                }
            }
            let _ = std::fs::remove_dir_all(site_dir);
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn fixture_site() -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut root = std::env::temp_dir();
    root.push(format!("folio_http_{}_{}", std::process::id(), nanos));

    std::fs::create_dir_all(root.join("pkg")).unwrap();
    std::fs::create_dir_all(root.join("notes")).unwrap();
    std::fs::write(root.join("index.html"), "<header class=\"header\"></header>").unwrap();
    std::fs::write(root.join("pkg").join("folio_bg.wasm"), b"\0asm").unwrap();
    std::fs::write(root.join("notes").join("index.html"), "<p>notes</p>").unwrap();
    root
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let site_dir = fixture_site();
    let child = Command::new(env!("CARGO_BIN_EXE_folio"))
        .env("PORT", port.to_string())
        .env("FOLIO_SITE_DIR", &site_dir)
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id(), site_dir.clone());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer {
        base_url,
        child,
        site_dir,
    }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

#[tokio::test]
async fn http_root_serves_index_page() {
    let server = shared_server().await;
    let response = Client::new()
        .get(format!("{}/", server.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"],
        "text/html; charset=utf-8"
    );
    assert!(response.text().await.unwrap().contains("class=\"header\""));
}

#[tokio::test]
async fn http_wasm_bundle_has_wasm_content_type() {
    let server = shared_server().await;
    let response = Client::new()
        .get(format!("{}/pkg/folio_bg.wasm", server.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "application/wasm");
    assert_eq!(&response.bytes().await.unwrap()[..], b"\0asm");
}

#[tokio::test]
async fn http_directory_falls_back_to_its_index() {
    let server = shared_server().await;
    let response = Client::new()
        .get(format!("{}/notes", server.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "<p>notes</p>");
}

#[tokio::test]
async fn http_missing_file_is_not_found() {
    let server = shared_server().await;
    let response = Client::new()
        .get(format!("{}/missing.css", server.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn http_dropping_server_removes_fixture_site() {
    let server = spawn_server().await;
    let site_dir = server.site_dir.clone();
    assert!(site_dir.join("index.html").exists());

    drop(server);

    assert!(!site_dir.exists());
}
