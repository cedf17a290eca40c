mod common;

use common::{edge, node, Call, FailOn, SharedBuffer, StubClient};
use graphiti_client::{EmbeddedClient, EntityEdge, GraphitiClient};
use graphiti_examples::dataset::{self, ATTORNEY_GENERAL_QUERY, GOVERNOR_QUERY};
use graphiti_examples::{Config, Connection, ExampleCart, ExampleError, ExampleStrategy};

fn indexing(enabled: bool) -> Config {
    Config {
        enable_indexing: enabled,
        ..Config::default()
    }
}

#[tokio::test]
async fn test_quickstart_call_sequence() {
    let stub = StubClient::new()
        .with_edges(vec![edge("e1", "harris", "Harris was AG"), edge("e2", "sf", "SF fact")])
        .with_nodes(vec![node("n1", "Gavin Newsom", "Governor of California")]);
    let calls = stub.calls.clone();
    let out = SharedBuffer::default();

    ExampleCart::new(indexing(true))
        .execute(ExampleStrategy::Quickstart, Connection::with_output(stub, out.clone()))
        .await
        .unwrap();

    let calls = calls.lock().unwrap().clone();
    assert_eq!(calls.len(), 9);
    assert_eq!(calls[0], Call::BuildIndices);
    assert!(calls[1..5].iter().all(|c| matches!(c, Call::AddEpisode(_))));
    assert_eq!(
        calls[5],
        Call::Search {
            query: ATTORNEY_GENERAL_QUERY.to_string(),
            center: None,
        }
    );
    assert_eq!(
        calls[6],
        Call::Search {
            query: ATTORNEY_GENERAL_QUERY.to_string(),
            center: Some("harris".to_string()),
        }
    );
    assert_eq!(
        calls[7],
        Call::SearchWithConfig {
            query: GOVERNOR_QUERY.to_string(),
            limit: 5,
        }
    );
    assert_eq!(calls[8], Call::Close);
    assert_eq!(out.lines().last().unwrap(), "connection closed !!");
}

#[tokio::test]
async fn test_quickstart_without_indexing() {
    let stub = StubClient::new();
    let calls = stub.calls.clone();
    let out = SharedBuffer::default();

    ExampleCart::new(indexing(false))
        .execute(ExampleStrategy::Quickstart, Connection::with_output(stub, out.clone()))
        .await
        .unwrap();

    let calls = calls.lock().unwrap().clone();
    assert!(!calls.iter().any(|c| matches!(c, Call::BuildIndices | Call::AddEpisode(_))));
    // empty first search: no anchored rerank
    let searches = calls.iter().filter(|c| matches!(c, Call::Search { .. })).count();
    assert_eq!(searches, 1);
    assert!(out.contents().contains("Indexing is disabled."));
    assert_eq!(calls.last(), Some(&Call::Close));
}

#[tokio::test]
async fn test_quickstart_failure_still_closes() {
    let stub = StubClient::new().failing(FailOn::Search);
    let calls = stub.calls.clone();

    let result = ExampleCart::new(indexing(true))
        .execute(
            ExampleStrategy::Quickstart,
            Connection::with_output(stub, SharedBuffer::default()),
        )
        .await;

    assert!(matches!(result, Err(ExampleError::Client(_))));
    let calls = calls.lock().unwrap().clone();
    assert!(!calls.iter().any(|c| matches!(c, Call::SearchWithConfig { .. })));
    assert_eq!(calls.last(), Some(&Call::Close));
}

#[tokio::test]
async fn test_langgraph_agent_is_not_implemented() {
    let stub = StubClient::new();
    let calls = stub.calls.clone();

    let result = ExampleCart::default()
        .execute(
            ExampleStrategy::LanggraphAgent,
            Connection::with_output(stub, SharedBuffer::default()),
        )
        .await;

    assert!(matches!(result, Err(ExampleError::NotImplemented("langgraph_agent"))));
    assert_eq!(*calls.lock().unwrap(), vec![Call::Close]);
}

#[tokio::test]
async fn test_quickstart_against_embedded_client() {
    let seeded: Vec<EntityEdge> = vec![
        edge("e1", "harris", "Kamala Harris is the Attorney General of California"),
        edge("e2", "newsom", "Gavin Newsom is the Governor of California"),
    ];
    let client = EmbeddedClient::with_graph(
        vec![node("harris", "Kamala Harris", "Attorney General of California")],
        seeded,
    );
    let graph = client.graph().clone();
    let out = SharedBuffer::default();

    ExampleCart::new(indexing(true))
        .execute(ExampleStrategy::Quickstart, Connection::with_output(client, out.clone()))
        .await
        .unwrap();

    let state = graph.read().await;
    assert!(state.indices_built);
    assert!(state.closed);
    let names: Vec<&str> = state.episodes.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Freakonomics Radio 0",
            "Freakonomics Radio 1",
            "Freakonomics Radio 2",
            "Freakonomics Radio 3",
        ]
    );

    let report = out.contents();
    assert!(report.contains("UUID: e1"));
    assert!(report.contains("Using center node UUID: harris"));
    assert!(report.contains("Node Name: Kamala Harris"));
}

#[tokio::test]
async fn test_quickstart_against_seeded_graph_finds_results() {
    let (nodes, edges) = dataset::seed_graph();
    let out = SharedBuffer::default();

    ExampleCart::new(indexing(true))
        .execute(
            ExampleStrategy::Quickstart,
            Connection::with_output(EmbeddedClient::with_graph(nodes, edges), out.clone()),
        )
        .await
        .unwrap();

    let report = out.contents();
    assert!(!report.contains("No results found"));
    assert!(report.contains("UUID: harris-attorney-general"));
    assert!(report.contains("Using center node UUID: kamala-harris"));
    assert!(report.contains("Node Name: Gavin Newsom"));
    assert!(report.contains("  position: Governor"));
}

#[tokio::test]
async fn test_closed_embedded_client_rejects_calls() {
    let client = EmbeddedClient::new();
    let graph = client.graph().clone();
    Connection::with_output(client, SharedBuffer::default())
        .close()
        .await
        .unwrap();
    assert!(graph.read().await.closed);

    let client = EmbeddedClient::new();
    client.close().await.unwrap();
    assert!(client.build_indices_and_constraints().await.is_err());
    assert!(client.close().await.is_err());
}
