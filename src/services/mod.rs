use actix_web::{get, HttpResponse, Responder};

pub mod db_models;
pub mod db_utils;
pub mod insertable;
pub mod messages;
pub mod pg_handling;
pub mod redis_handling;
pub mod slug;

#[get("/")]
pub async fn home_page() -> impl Responder {
    HttpResponse::Ok().body("Loja backend service")
}

// sub-route "/carrinhos"
pub mod carrinho_route {
    use actix_web::web::{Data, Json, Path, Query};
    use actix_web::{delete, get, post, put, HttpResponse, Responder, ResponseError};
    use serde::Deserialize;

    use crate::services::db_utils::AppState;
    use crate::services::messages::{
        AddItemToCarrinho, CancelCarrinho, CreateCarrinho, DeleteCarrinho, FetchCarrinho,
        FetchCarrinhos, RemoveItemFromCarrinho, UpdateCarrinho, UpdateItemCarrinho,
    };
    use crate::types::ShopError;

    #[derive(Deserialize)]
    pub struct FiltroCarrinhos {
        pub usuario_id: Option<i64>,
        pub sessao_id: Option<String>,
    }

    #[get("/")]
    pub async fn listar_carrinhos(state: Data<AppState>, filtro: Query<FiltroCarrinhos>) -> impl Responder {
        let filtro = filtro.into_inner();

        match state.pg_db.send(FetchCarrinhos {
            usuario_id: filtro.usuario_id,
            sessao_id: filtro.sessao_id,
        }).await {
            Ok(Ok(resp)) => HttpResponse::Ok().json(resp),
            Ok(Err(err)) => err.error_response(),
            Err(err) => ShopError::Internal(err.to_string()).error_response(),
        }
    }

    #[derive(Deserialize)]
    pub struct CriarCarrinhoBody {
        pub usuario_id: Option<i64>,
        pub sessao_id: Option<String>,
    }

    #[post("/")]
    pub async fn criar_carrinho(state: Data<AppState>, body: Json<CriarCarrinhoBody>) -> impl Responder {
        match state.pg_db.send(CreateCarrinho {
            usuario_id: body.usuario_id,
            sessao_id: body.sessao_id.clone(),
        }).await {
            Ok(Ok(resp)) => HttpResponse::Created().json(resp),
            Ok(Err(err)) => err.error_response(),
            Err(err) => ShopError::Internal(err.to_string()).error_response(),
        }
    }

    #[get("/{slug}/")]
    pub async fn detalhe_carrinho(state: Data<AppState>, path: Path<String>) -> impl Responder {
        match state.pg_db.send(FetchCarrinho { slug: path.into_inner() }).await {
            Ok(Ok(resp)) => HttpResponse::Ok().json(resp),
            Ok(Err(err)) => err.error_response(),
            Err(err) => ShopError::Internal(err.to_string()).error_response(),
        }
    }

    #[derive(Deserialize)]
    pub struct AtualizarCarrinhoBody {
        pub usuario_id: Option<i64>,
        pub sessao_id: Option<String>,
    }

    #[put("/{slug}/")]
    pub async fn atualizar_carrinho(
        state: Data<AppState>,
        path: Path<String>,
        body: Json<AtualizarCarrinhoBody>,
    ) -> impl Responder {
        match state.pg_db.send(UpdateCarrinho {
            slug: path.into_inner(),
            usuario_id: body.usuario_id,
            sessao_id: body.sessao_id.clone(),
        }).await {
            Ok(Ok(resp)) => HttpResponse::Ok().json(resp),
            Ok(Err(err)) => err.error_response(),
            Err(err) => ShopError::Internal(err.to_string()).error_response(),
        }
    }

    #[delete("/{slug}/")]
    pub async fn excluir_carrinho(state: Data<AppState>, path: Path<String>) -> impl Responder {
        match state.pg_db.send(DeleteCarrinho { slug: path.into_inner() }).await {
            Ok(Ok(())) => HttpResponse::NoContent().finish(),
            Ok(Err(err)) => err.error_response(),
            Err(err) => ShopError::Internal(err.to_string()).error_response(),
        }
    }

    #[derive(Deserialize)]
    pub struct AdicionarItemBody {
        pub produto_id: Option<i64>,
        pub quantidade: Option<i32>,
        pub empresa_id: Option<String>,
        /// Slug do produto no momento da adição, preservado no item.
        pub slug: Option<String>,
    }

    #[post("/{slug}/adicionar-item/")]
    pub async fn adicionar_item(
        state: Data<AppState>,
        path: Path<String>,
        body: Json<AdicionarItemBody>,
    ) -> impl Responder {
        let carrinho_slug = path.into_inner();

        let produto_id = match body.produto_id {
            Some(valor) => valor,
            None => return ShopError::Validation("produto_id é obrigatório".into()).error_response(),
        };
        let quantidade = body.quantidade.unwrap_or(1);
        if quantidade <= 0 {
            return ShopError::Validation("Quantidade deve ser maior que zero".into()).error_response();
        }

        match state.pg_db.send(AddItemToCarrinho {
            carrinho_slug,
            produto_id,
            quantidade,
            empresa_id: body.empresa_id.clone(),
            produto_slug: body.slug.clone(),
        }).await {
            Ok(Ok(resp)) => HttpResponse::Created().json(resp),
            Ok(Err(err)) => err.error_response(),
            Err(err) => ShopError::Internal(err.to_string()).error_response(),
        }
    }

    #[derive(Deserialize)]
    pub struct AtualizarItemBody {
        pub item_slug: Option<String>,
        pub quantidade: Option<i32>,
    }

    #[put("/{slug}/atualizar-item/")]
    pub async fn atualizar_item(
        state: Data<AppState>,
        path: Path<String>,
        body: Json<AtualizarItemBody>,
    ) -> impl Responder {
        let item_slug = match &body.item_slug {
            Some(valor) => valor.clone(),
            None => return ShopError::Validation("item_slug é obrigatório".into()).error_response(),
        };

        match state.pg_db.send(UpdateItemCarrinho {
            carrinho_slug: path.into_inner(),
            item_slug,
            quantidade: body.quantidade.unwrap_or(1),
        }).await {
            Ok(Ok(resp)) => HttpResponse::Ok().json(resp),
            Ok(Err(err)) => err.error_response(),
            Err(err) => ShopError::Internal(err.to_string()).error_response(),
        }
    }

    #[derive(Deserialize)]
    pub struct RemoverItemBody {
        /// Carrega o produto_slug do item a remover.
        pub item_slug: Option<String>,
    }

    #[post("/{slug}/remover-item/")]
    pub async fn remover_item(
        state: Data<AppState>,
        path: Path<String>,
        body: Json<RemoverItemBody>,
    ) -> impl Responder {
        let produto_slug = match &body.item_slug {
            Some(valor) => valor.clone(),
            None => return ShopError::Validation("item_slug é obrigatório".into()).error_response(),
        };

        match state.pg_db.send(RemoveItemFromCarrinho {
            carrinho_slug: path.into_inner(),
            produto_slug,
        }).await {
            Ok(Ok(resp)) => HttpResponse::Ok().json(resp),
            Ok(Err(err)) => err.error_response(),
            Err(err) => ShopError::Internal(err.to_string()).error_response(),
        }
    }

    #[post("/{slug}/cancelar-pedido/")]
    pub async fn cancelar_pedido(state: Data<AppState>, path: Path<String>) -> impl Responder {
        match state.pg_db.send(CancelCarrinho { slug: path.into_inner() }).await {
            Ok(Ok(())) => HttpResponse::Ok().json(serde_json::json!({
                "message": "Carrinho cancelado com sucesso"
            })),
            Ok(Err(err)) => err.error_response(),
            Err(err) => ShopError::Internal(err.to_string()).error_response(),
        }
    }
}

// sub-route "/mesas"
pub mod mesa_route {
    use actix_web::web::{Data, Json, Path};
    use actix_web::{delete, get, post, put, HttpResponse, Responder, ResponseError};
    use serde::Deserialize;

    use crate::services::db_utils::AppState;
    use crate::services::messages::{
        AddItemToMesa, CancelMesaPedido, CreateMesa, DeleteMesa, FetchMesa, FetchMesas,
        RemoveItemFromMesa, UpdateMesa,
    };
    use crate::types::ShopError;

    #[get("/")]
    pub async fn listar_mesas(state: Data<AppState>) -> impl Responder {
        match state.pg_db.send(FetchMesas).await {
            Ok(Ok(resp)) => HttpResponse::Ok().json(resp),
            Ok(Err(err)) => err.error_response(),
            Err(err) => ShopError::Internal(err.to_string()).error_response(),
        }
    }

    #[derive(Deserialize)]
    pub struct CriarMesaBody {
        pub empresa: Option<i64>,
        pub numero: String,
        pub nome: String,
        pub descricao: Option<String>,
        pub numero_pessoas: Option<i32>,
        pub not_numerico: Option<bool>,
    }

    #[post("/")]
    pub async fn criar_mesa(state: Data<AppState>, body: Json<CriarMesaBody>) -> impl Responder {
        let body = body.into_inner();

        match state.pg_db.send(CreateMesa {
            empresa_id: body.empresa,
            numero: body.numero,
            nome: body.nome,
            descricao: body.descricao,
            numero_pessoas: body.numero_pessoas,
            not_numerico: body.not_numerico,
        }).await {
            Ok(Ok(resp)) => HttpResponse::Created().json(resp),
            Ok(Err(err)) => err.error_response(),
            Err(err) => ShopError::Internal(err.to_string()).error_response(),
        }
    }

    #[get("/{slug}/")]
    pub async fn detalhe_mesa(state: Data<AppState>, path: Path<String>) -> impl Responder {
        match state.pg_db.send(FetchMesa { slug: path.into_inner() }).await {
            Ok(Ok(resp)) => HttpResponse::Ok().json(resp),
            Ok(Err(err)) => err.error_response(),
            Err(err) => ShopError::Internal(err.to_string()).error_response(),
        }
    }

    #[derive(Deserialize)]
    pub struct AtualizarMesaBody {
        pub numero: Option<String>,
        pub nome: Option<String>,
        pub descricao: Option<String>,
        pub numero_pessoas: Option<i32>,
        pub not_numerico: Option<bool>,
    }

    #[put("/{slug}/")]
    pub async fn atualizar_mesa(
        state: Data<AppState>,
        path: Path<String>,
        body: Json<AtualizarMesaBody>,
    ) -> impl Responder {
        let body = body.into_inner();

        match state.pg_db.send(UpdateMesa {
            slug: path.into_inner(),
            numero: body.numero,
            nome: body.nome,
            descricao: body.descricao,
            numero_pessoas: body.numero_pessoas,
            not_numerico: body.not_numerico,
        }).await {
            Ok(Ok(resp)) => HttpResponse::Ok().json(resp),
            Ok(Err(err)) => err.error_response(),
            Err(err) => ShopError::Internal(err.to_string()).error_response(),
        }
    }

    #[delete("/{slug}/")]
    pub async fn excluir_mesa(state: Data<AppState>, path: Path<String>) -> impl Responder {
        match state.pg_db.send(DeleteMesa { slug: path.into_inner() }).await {
            Ok(Ok(())) => HttpResponse::NoContent().finish(),
            Ok(Err(err)) => err.error_response(),
            Err(err) => ShopError::Internal(err.to_string()).error_response(),
        }
    }

    #[derive(Deserialize)]
    pub struct AdicionarItemMesaBody {
        pub produto_id: Option<i64>,
        pub quantidade: Option<i32>,
    }

    #[post("/{slug}/adicionar-item/")]
    pub async fn adicionar_item(
        state: Data<AppState>,
        path: Path<String>,
        body: Json<AdicionarItemMesaBody>,
    ) -> impl Responder {
        let produto_id = match body.produto_id {
            Some(valor) => valor,
            None => return ShopError::Validation("produto_id é obrigatório".into()).error_response(),
        };
        let quantidade = body.quantidade.unwrap_or(1);
        if quantidade <= 0 {
            return ShopError::Validation("Quantidade deve ser maior que zero".into()).error_response();
        }

        match state.pg_db.send(AddItemToMesa {
            mesa_slug: path.into_inner(),
            produto_id,
            quantidade,
        }).await {
            Ok(Ok(resp)) => HttpResponse::Created().json(resp),
            Ok(Err(err)) => err.error_response(),
            Err(err) => ShopError::Internal(err.to_string()).error_response(),
        }
    }

    #[derive(Deserialize)]
    pub struct RemoverItemMesaBody {
        /// O frontend envia o id do ItemMesa sob o nome produto_id.
        pub produto_id: Option<i64>,
    }

    #[post("/{slug}/remover-item/")]
    pub async fn remover_item(
        state: Data<AppState>,
        path: Path<String>,
        body: Json<RemoverItemMesaBody>,
    ) -> impl Responder {
        let item_id = match body.produto_id {
            Some(valor) => valor,
            None => return ShopError::Validation("Item ID é obrigatório".into()).error_response(),
        };

        match state.pg_db.send(RemoveItemFromMesa {
            mesa_slug: path.into_inner(),
            item_id,
        }).await {
            Ok(Ok(resp)) => HttpResponse::Ok().json(resp),
            Ok(Err(err)) => err.error_response(),
            Err(err) => ShopError::Internal(err.to_string()).error_response(),
        }
    }

    #[post("/{slug}/cancelar-pedido/")]
    pub async fn cancelar_pedido(state: Data<AppState>, path: Path<String>) -> impl Responder {
        match state.pg_db.send(CancelMesaPedido { slug: path.into_inner() }).await {
            Ok(Ok(())) => HttpResponse::Ok().json(serde_json::json!({
                "message": "Pedido cancelado com sucesso"
            })),
            Ok(Err(err)) => err.error_response(),
            Err(err) => ShopError::Internal(err.to_string()).error_response(),
        }
    }
}

// sub-route "/pedidos"
pub mod pedido_route {
    use actix_web::web::{Data, Json, Path};
    use actix_web::{delete, get, post, put, HttpResponse, Responder, ResponseError};
    use bigdecimal::BigDecimal;
    use serde::Deserialize;

    use crate::services::db_utils::AppState;
    use crate::services::messages::{
        ConfirmarRecebimento, CreatePedidoFromCarrinho, DeletePedido, FetchPedido, FetchPedidos,
        UpdatePedidoStatus,
    };
    use crate::types::{PedidoStatus, ShopError};

    #[get("/")]
    pub async fn listar_pedidos(state: Data<AppState>) -> impl Responder {
        match state.pg_db.send(FetchPedidos).await {
            Ok(Ok(resp)) => HttpResponse::Ok().json(resp),
            Ok(Err(err)) => err.error_response(),
            Err(err) => ShopError::Internal(err.to_string()).error_response(),
        }
    }

    #[get("/{slug}/")]
    pub async fn detalhe_pedido(state: Data<AppState>, path: Path<String>) -> impl Responder {
        match state.pg_db.send(FetchPedido { slug: path.into_inner() }).await {
            Ok(Ok(resp)) => HttpResponse::Ok().json(resp),
            Ok(Err(err)) => err.error_response(),
            Err(err) => ShopError::Internal(err.to_string()).error_response(),
        }
    }

    #[delete("/{slug}/")]
    pub async fn excluir_pedido(state: Data<AppState>, path: Path<String>) -> impl Responder {
        match state.pg_db.send(DeletePedido { slug: path.into_inner() }).await {
            Ok(Ok(())) => HttpResponse::NoContent().finish(),
            Ok(Err(err)) => err.error_response(),
            Err(err) => ShopError::Internal(err.to_string()).error_response(),
        }
    }

    #[derive(Deserialize)]
    pub struct CriarPedidoBody {
        pub metodo_pagamento: Option<String>,
        pub empresa_id: Option<i64>,
        pub desconto_aplicado: Option<BigDecimal>,
        pub usuario_id: Option<i64>,
    }

    #[post("/carrinho/{slug}/criar/")]
    pub async fn criar_do_carrinho(
        state: Data<AppState>,
        path: Path<String>,
        body: Json<CriarPedidoBody>,
    ) -> impl Responder {
        let body = body.into_inner();

        match state.pg_db.send(CreatePedidoFromCarrinho {
            carrinho_slug: path.into_inner(),
            usuario_id: body.usuario_id,
            empresa_id: body.empresa_id,
            metodo_pagamento: body.metodo_pagamento,
            desconto_aplicado: body.desconto_aplicado,
        }).await {
            Ok(Ok(resp)) => HttpResponse::Created().json(resp),
            Ok(Err(err)) => err.error_response(),
            Err(err) => ShopError::Internal(err.to_string()).error_response(),
        }
    }

    #[derive(Deserialize)]
    pub struct AtualizarStatusBody {
        pub status: Option<String>,
    }

    #[put("/{slug}/atualizar-status/")]
    pub async fn atualizar_status(
        state: Data<AppState>,
        path: Path<String>,
        body: Json<AtualizarStatusBody>,
    ) -> impl Responder {
        // closed enumeration, anything outside it is rejected here at the boundary
        let status = match body.status.as_deref().and_then(PedidoStatus::parse) {
            Some(valor) => valor,
            None => return ShopError::Validation("Status inválido".into()).error_response(),
        };

        match state.pg_db.send(UpdatePedidoStatus { slug: path.into_inner(), status }).await {
            Ok(Ok(resp)) => HttpResponse::Ok().json(resp),
            Ok(Err(err)) => err.error_response(),
            Err(err) => ShopError::Internal(err.to_string()).error_response(),
        }
    }

    #[post("/{slug}/confirmar-recebimento/")]
    pub async fn confirmar_recebimento(state: Data<AppState>, path: Path<String>) -> impl Responder {
        match state.pg_db.send(ConfirmarRecebimento { slug: path.into_inner() }).await {
            Ok(Ok(resp)) => HttpResponse::Ok().json(resp),
            Ok(Err(err)) => err.error_response(),
            Err(err) => ShopError::Internal(err.to_string()).error_response(),
        }
    }
}

// sub-route "/produtos"
pub mod produto_route {
    use actix_web::web::{Data, Json, Path};
    use actix_web::{get, post, HttpResponse, Responder, ResponseError};
    use bigdecimal::BigDecimal;
    use serde::Deserialize;

    use crate::services::db_utils::AppState;
    use crate::services::messages::{CreateProduto, FetchProduto, FetchProdutos};
    use crate::services::redis_handling::{get_catalogo, invalidate_catalogo, put_catalogo};
    use crate::types::ShopError;

    #[get("/")]
    pub async fn listar_produtos(state: Data<AppState>) -> impl Responder {
        if let Ok(Some(cached)) = get_catalogo(&state.redis_db) {
            if let Ok(catalogo) = serde_json::from_str::<serde_json::Value>(&cached) {
                return HttpResponse::Ok().json(catalogo);
            }
        }

        match state.pg_db.send(FetchProdutos).await {
            Ok(Ok(produtos)) => {
                match serde_json::to_string(&produtos) {
                    Ok(json) => {
                        if let Err(err) = put_catalogo(&state.redis_db, &json) {
                            log::warn!("falha ao gravar catálogo no redis: {err}");
                        }
                    }
                    Err(err) => log::warn!("falha ao serializar catálogo: {err}"),
                }
                HttpResponse::Ok().json(produtos)
            }
            Ok(Err(err)) => err.error_response(),
            Err(err) => ShopError::Internal(err.to_string()).error_response(),
        }
    }

    #[get("/{slug}/")]
    pub async fn detalhe_produto(state: Data<AppState>, path: Path<String>) -> impl Responder {
        match state.pg_db.send(FetchProduto { slug: path.into_inner() }).await {
            Ok(Ok(resp)) => HttpResponse::Ok().json(resp),
            Ok(Err(err)) => err.error_response(),
            Err(err) => ShopError::Internal(err.to_string()).error_response(),
        }
    }

    #[derive(Deserialize)]
    pub struct CriarProdutoBody {
        pub nome: Option<String>,
        pub descricao: Option<String>,
        pub custo: Option<BigDecimal>,
        pub venda: Option<BigDecimal>,
        pub codigo: Option<String>,
        pub estoque: Option<i32>,
        pub empresa_id: Option<i64>,
        pub categoria: Option<String>,
        pub imagem: Option<String>,
    }

    #[post("/")]
    pub async fn criar_produto(state: Data<AppState>, body: Json<CriarProdutoBody>) -> impl Responder {
        let body = body.into_inner();

        let nome = match body.nome {
            Some(valor) => valor,
            None => return ShopError::Validation("nome é obrigatório".into()).error_response(),
        };
        let codigo = match body.codigo {
            Some(valor) => valor,
            None => return ShopError::Validation("codigo é obrigatório".into()).error_response(),
        };
        let empresa_id = match body.empresa_id {
            Some(valor) => valor,
            None => return ShopError::Validation("empresa_id é obrigatório".into()).error_response(),
        };
        let estoque = body.estoque.unwrap_or(0);
        if estoque < 0 {
            return ShopError::Validation("Estoque não pode ser negativo".into()).error_response();
        }

        match state.pg_db.send(CreateProduto {
            nome,
            descricao: body.descricao.unwrap_or_default(),
            custo: body.custo.unwrap_or_else(|| BigDecimal::from(0)),
            venda: body.venda.unwrap_or_else(|| BigDecimal::from(0)),
            codigo,
            estoque,
            empresa_id,
            categoria: body.categoria,
            imagem: body.imagem,
        }).await {
            Ok(Ok(resp)) => {
                if let Err(err) = invalidate_catalogo(&state.redis_db) {
                    log::warn!("falha ao invalidar catálogo no redis: {err}");
                }
                HttpResponse::Created().json(resp)
            }
            Ok(Err(err)) => err.error_response(),
            Err(err) => ShopError::Internal(err.to_string()).error_response(),
        }
    }
}

// sub-route "/estoques"
pub mod estoque_route {
    use actix_web::web::Data;
    use actix_web::{get, HttpResponse, Responder, ResponseError};

    use crate::services::db_utils::AppState;
    use crate::services::messages::FetchEstoques;
    use crate::types::ShopError;

    #[get("/")]
    pub async fn listar_estoques(state: Data<AppState>) -> impl Responder {
        match state.pg_db.send(FetchEstoques).await {
            Ok(Ok(resp)) => HttpResponse::Ok().json(resp),
            Ok(Err(err)) => err.error_response(),
            Err(err) => ShopError::Internal(err.to_string()).error_response(),
        }
    }
}

// sub-route "/test"
pub mod test_route {
    use actix_web::{get, HttpResponse, Responder};

    #[get("/healthcheck")]
    pub async fn healthcheck() -> impl Responder {
        HttpResponse::Ok().body("I'm alive!")
    }
}
