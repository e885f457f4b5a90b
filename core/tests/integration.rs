//! End-to-end tests against the mock pubstat server.
//!
//! # Design
//! Starts the mock server on a random port, then drives the client through
//! `ReqwestTransport` over real HTTP, so URL rendering, the transport and
//! response classification are checked together.

use lfsworld_core::{Client, Config, FetchError, Params};
use serde::Deserialize;
use tokio::net::TcpListener;

async fn start_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run(listener));
    addr.to_string()
}

async fn client() -> Client {
    let domain = start_server().await;
    Client::new(
        Config::new(mock_server::DEFAULT_IDK).with_domain(domain),
    )
}

#[tokio::test]
async fn hosts_succeeds_with_valid_key() {
    let client = client().await;
    let res = client.hosts().await.unwrap();
    assert!(res.is_success(), "raw: {:?}", res.raw());
    assert_eq!(res.status(), 200);
    assert_eq!(res.data().unwrap()[0]["racers"][1], "Eric");
}

#[tokio::test]
async fn wrong_key_is_error_with_status_200() {
    let mut client = client().await;
    client.set_option("idk", "wrong").unwrap();

    let res = client.counters().await.unwrap();
    assert_eq!(res.status(), 200);
    assert!(res.is_error());
    assert_eq!(res.raw(), Some(mock_server::IDK_REQUIRED));
}

#[tokio::test]
async fn parameters_reach_the_server() {
    let client = client().await;

    let res = client.world_records("BL1", "XRT").await.unwrap();
    assert!(res.is_success());
    assert_eq!(res.data().unwrap()[0]["track"], "BL1");

    let res = client.online_status("Victor").await.unwrap();
    assert_eq!(res.data().unwrap()["racer"], "Victor");
}

#[tokio::test]
async fn typed_decoding_of_payload() {
    #[derive(Debug, Deserialize)]
    struct PersonalBest {
        track: String,
        car: String,
        laptime: u64,
    }

    let client = client().await;
    let res = client.personal_bests("Victor").await.unwrap();
    let bests: Vec<PersonalBest> = res.data_as().unwrap();
    assert_eq!(bests.len(), 1);
    assert_eq!(bests[0].car, "XFG");
    assert_eq!(bests[0].track, "000");
    assert!(bests[0].laptime > 0);
}

#[tokio::test]
async fn highlights_are_text_not_json() {
    let client = client().await;
    let res = client.highlights("nl").await.unwrap();
    assert_eq!(res.status(), 200);
    assert!(res.is_error());
    assert_eq!(res.raw_lines().count(), 2);
}

#[tokio::test]
async fn registered_endpoint_is_fetchable() {
    let mut client = client().await;
    assert!(client.register("hl2", "/pubstat/get_stat2.php?action=hl&racer=%(racer)s", 1.3));

    let res = client
        .fetch("hl2", &Params::new().with("racer", "Eric"))
        .await
        .unwrap();
    assert!(res.is_success());
    assert_eq!(res.data().unwrap()[0]["racer"], "Eric");
}

#[tokio::test]
async fn version_gate_blocks_request() {
    let mut client = client().await;
    client.set_option("version", "1.4").unwrap();

    let err = client.teams().await.unwrap_err();
    assert!(matches!(err, FetchError::UnsupportedVersion { .. }));
}

#[tokio::test]
async fn unreachable_host_yields_error_response() {
    // Bind then drop, so nothing listens on the port.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = Client::new(Config::new("k").with_domain(addr.to_string()));
    let res = client.hosts().await.unwrap();
    assert!(res.is_error());
    assert_eq!(res.status(), -1);
}

#[tokio::test]
async fn callbacks_complete_for_concurrent_fetches() {
    let client = client().await;
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();

    let mut handles = Vec::new();
    for racer in ["Victor", "Eric", "Scawen"] {
        let tx = tx.clone();
        handles.push(client.fetch_with(
            "pb",
            Params::new().with("racer", racer),
            move |result| {
                let _ = tx.send((racer, result));
            },
        ));
    }
    drop(tx);
    for handle in handles {
        handle.await.unwrap();
    }

    let mut seen = Vec::new();
    while let Some((racer, result)) = rx.recv().await {
        let res = result.unwrap();
        assert_eq!(res.data().unwrap()[0]["racer"], racer);
        seen.push(racer);
    }
    seen.sort_unstable();
    assert_eq!(seen, ["Eric", "Scawen", "Victor"]);
}
