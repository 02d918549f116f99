use std::rc::Rc;

use gloo::console;
use gloo::net::http::Request;
use wasm_bindgen_futures::spawn_local;

use queens_quadrille_core::{
    BoardState, GatewayError, GenerateResponse, SolveReply, SolveRequest, SolveResponse,
};

use crate::runtime::SolverGateway;

pub(crate) struct FetchGateway {
    api_base: String,
}

impl FetchGateway {
    pub(crate) fn new(api_base: String) -> Self {
        Self { api_base }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }
}

impl SolverGateway for FetchGateway {
    fn generate(&self, done: Rc<dyn Fn(Result<BoardState, GatewayError>)>) {
        let url = self.endpoint("/api/generate");
        spawn_local(async move {
            let result = fetch_generate(&url).await;
            if let Err(error) = &result {
                console::warn!("generate failed", error.to_string());
            }
            done(result);
        });
    }

    fn solve(&self, request: SolveRequest, done: Rc<dyn Fn(Result<SolveReply, GatewayError>)>) {
        let url = self.endpoint("/api/solve");
        spawn_local(async move {
            let result = fetch_solve(&url, &request).await;
            if let Err(error) = &result {
                console::warn!("solve failed", error.to_string());
            }
            done(result);
        });
    }
}

fn transport(error: gloo::net::Error) -> GatewayError {
    GatewayError::Transport(error.to_string())
}

async fn fetch_generate(url: &str) -> Result<BoardState, GatewayError> {
    let response = Request::post(url).send().await.map_err(transport)?;
    let payload: GenerateResponse = response.json().await.map_err(transport)?;
    payload.into_board()
}

async fn fetch_solve(url: &str, request: &SolveRequest) -> Result<SolveReply, GatewayError> {
    let response = Request::post(url)
        .json(request)
        .map_err(transport)?
        .send()
        .await
        .map_err(transport)?;
    let payload: SolveResponse = response.json().await.map_err(transport)?;
    payload.into_reply()
}
