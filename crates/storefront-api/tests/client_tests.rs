// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, anyhow};
use std::io::Read;
use std::thread;
use std::time::Duration;
use storefront_api::ShopApi;
use storefront_app::{
    ApiError, Budget, BudgetId, BudgetStatus, CollectionClient, NewNote, Note, NoteId, Product,
    ProductId,
};
use tiny_http::{Header, Method, Response, Server};

fn json_response(body: &str, status: u16) -> Response<std::io::Cursor<Vec<u8>>> {
    Response::from_string(body)
        .with_status_code(status)
        .with_header(
            Header::from_bytes("Content-Type", "application/json")
                .expect("valid content type header"),
        )
}

fn mock_server() -> Result<(Server, String)> {
    let server =
        Server::http("127.0.0.1:0").map_err(|error| anyhow!("start mock server: {error}"))?;
    let addr = format!("http://{}/api", server.server_addr());
    Ok((server, addr))
}

#[test]
fn unreachable_api_reports_network_error() -> Result<()> {
    let api = ShopApi::new("http://127.0.0.1:1/api", Duration::from_millis(50))?;
    let error = api
        .collection::<Product>()
        .list()
        .expect_err("list should fail for unreachable endpoint");

    assert!(matches!(error, ApiError::Network { .. }));
    assert!(error.to_string().contains("[api].base_url"));
    Ok(())
}

#[test]
fn list_reads_collection_key_from_php_endpoint() -> Result<()> {
    let (server, addr) = mock_server()?;

    let handle = thread::spawn(move || {
        let request = server.recv().expect("request expected");
        assert_eq!(request.method(), &Method::Get);
        assert_eq!(request.url(), "/api/products/get_products.php");
        let body = r#"{"products":[
            {"id":1,"nome":"Produto A","fabricante":"Fornecedor X","validade":"2025-12-31",
             "custo":"10.00","venda":"15.00","quantidade":30,"codigo":"123456789"},
            {"id":"2","nome":"Produto B","fabricante":"Fornecedor Y","validade":null,
             "custo":20,"venda":"R$ 30,00","quantidade":"50"}
        ]}"#;
        request
            .respond(json_response(body, 200))
            .expect("response should succeed");
    });

    let mut products = ShopApi::new(&addr, Duration::from_secs(1))?.collection::<Product>();
    let listed = products.list()?;
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].name, "Produto A");
    assert_eq!(listed[1].id, ProductId::new(2));
    assert_eq!(listed[1].price_cents, 3_000);
    assert_eq!(listed[1].expires_on, None);

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn list_without_collection_key_is_malformed() -> Result<()> {
    let (server, addr) = mock_server()?;

    let handle = thread::spawn(move || {
        let request = server.recv().expect("request expected");
        request
            .respond(json_response(r#"{"items":[]}"#, 200))
            .expect("response should succeed");
    });

    let error = ShopApi::new(&addr, Duration::from_secs(1))?
        .collection::<Note>()
        .list()
        .expect_err("missing key should fail");
    assert!(matches!(error, ApiError::Server { status: None, .. }));
    assert!(error.to_string().contains("`notes`"));

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn create_posts_json_and_returns_server_message() -> Result<()> {
    let (server, addr) = mock_server()?;

    let handle = thread::spawn(move || {
        let mut request = server.recv().expect("request expected");
        assert_eq!(request.method(), &Method::Post);
        assert_eq!(request.url(), "/api/notes/add_notes.php");

        let mut body = String::new();
        request
            .as_reader()
            .read_to_string(&mut body)
            .expect("request body should read");
        let payload: serde_json::Value =
            serde_json::from_str(&body).expect("request body should be json");
        assert_eq!(payload["descricao"], "Nota Fiscal 003");
        assert_eq!(payload["valor"], "250.50");
        assert_eq!(payload["vencimento"], "2025-09-01");
        assert!(payload.get("id").is_none());

        request
            .respond(json_response(
                r#"{"message":"Nota adicionada com sucesso!"}"#,
                200,
            ))
            .expect("response should succeed");
    });

    let mut notes = ShopApi::new(&addr, Duration::from_secs(1))?.collection::<Note>();
    let message = notes.create(&NewNote {
        description: "Nota Fiscal 003".to_owned(),
        amount_cents: 25_050,
        due_on: time::macros::date!(2025 - 09 - 01),
    })?;
    assert_eq!(message, "Nota adicionada com sucesso!");

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn update_sends_full_record_and_delete_sends_id() -> Result<()> {
    let (server, addr) = mock_server()?;

    let handle = thread::spawn(move || {
        let expectations = [
            ("/api/budgets/update_budgets.php", "id", serde_json::json!(2)),
            ("/api/budgets/delete_budgets.php", "id", serde_json::json!(2)),
        ];
        for (url, key, value) in expectations {
            let mut request = server.recv().expect("request expected");
            assert_eq!(request.url(), url);
            let mut body = String::new();
            request
                .as_reader()
                .read_to_string(&mut body)
                .expect("request body should read");
            let payload: serde_json::Value =
                serde_json::from_str(&body).expect("request body should be json");
            assert_eq!(payload[key], value);
            request
                .respond(json_response("{}", 200))
                .expect("response should succeed");
        }
    });

    let mut budgets = ShopApi::new(&addr, Duration::from_secs(1))?.collection::<Budget>();
    let budget = Budget {
        id: BudgetId::new(2),
        supplier: "Fornecedor Y".to_owned(),
        amount_cents: 150_000,
        description: String::new(),
        status: BudgetStatus::Approved,
    };
    assert_eq!(budgets.update(&budget)?, "");
    assert_eq!(budgets.delete(BudgetId::new(2))?, "");

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn non_success_status_becomes_server_error() -> Result<()> {
    let (server, addr) = mock_server()?;

    let handle = thread::spawn(move || {
        let request = server.recv().expect("request expected");
        request
            .respond(json_response(r#"{"message":"id não encontrado"}"#, 404))
            .expect("response should succeed");
    });

    let error = ShopApi::new(&addr, Duration::from_secs(1))?
        .collection::<Note>()
        .delete(NoteId::new(99))
        .expect_err("404 should fail");
    assert_eq!(error, ApiError::server(Some(404), "id não encontrado"));

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn refused_write_with_success_status_is_an_error() -> Result<()> {
    let (server, addr) = mock_server()?;

    let handle = thread::spawn(move || {
        let request = server.recv().expect("request expected");
        request
            .respond(json_response(
                r#"{"status":"error","message":"Orçamento inválido"}"#,
                200,
            ))
            .expect("response should succeed");
    });

    let error = ShopApi::new(&addr, Duration::from_secs(1))?
        .collection::<Budget>()
        .delete(BudgetId::new(1))
        .expect_err("refusal should fail");
    assert_eq!(error, ApiError::server(None, "Orçamento inválido"));

    handle.join().expect("server thread should join");
    Ok(())
}
