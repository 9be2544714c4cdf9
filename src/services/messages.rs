use actix::Message;
use bigdecimal::BigDecimal;

use crate::services::db_models::{CarrinhoDetalhe, Estoque, MesaDetalhe, PedidoDetalhe, Produto};
use crate::types::{PedidoStatus, ShopError};

// ---- carrinhos ----

#[derive(Message)]
#[rtype(result = "Result<Vec<CarrinhoDetalhe>, ShopError>")]
pub struct FetchCarrinhos {
    pub usuario_id: Option<i64>,
    pub sessao_id: Option<String>,
}

#[derive(Message)]
#[rtype(result = "Result<CarrinhoDetalhe, ShopError>")]
pub struct CreateCarrinho {
    pub usuario_id: Option<i64>,
    pub sessao_id: Option<String>,
}

#[derive(Message)]
#[rtype(result = "Result<CarrinhoDetalhe, ShopError>")]
pub struct FetchCarrinho {
    pub slug: String,
}

#[derive(Message)]
#[rtype(result = "Result<CarrinhoDetalhe, ShopError>")]
pub struct UpdateCarrinho {
    pub slug: String,
    pub usuario_id: Option<i64>,
    pub sessao_id: Option<String>,
}

#[derive(Message)]
#[rtype(result = "Result<(), ShopError>")]
pub struct DeleteCarrinho {
    pub slug: String,
}

#[derive(Message)]
#[rtype(result = "Result<CarrinhoDetalhe, ShopError>")]
pub struct AddItemToCarrinho {
    pub carrinho_slug: String,
    pub produto_id: i64,
    pub quantidade: i32,
    pub empresa_id: Option<String>,
    /// Product slug supplied by the client, kept on the item so the line
    /// survives later product renames.
    pub produto_slug: Option<String>,
}

#[derive(Message)]
#[rtype(result = "Result<CarrinhoDetalhe, ShopError>")]
pub struct UpdateItemCarrinho {
    pub carrinho_slug: String,
    pub item_slug: String,
    pub quantidade: i32,
}

#[derive(Message)]
#[rtype(result = "Result<CarrinhoDetalhe, ShopError>")]
pub struct RemoveItemFromCarrinho {
    pub carrinho_slug: String,
    pub produto_slug: String,
}

#[derive(Message)]
#[rtype(result = "Result<(), ShopError>")]
pub struct CancelCarrinho {
    pub slug: String,
}

// ---- mesas ----

#[derive(Message)]
#[rtype(result = "Result<Vec<MesaDetalhe>, ShopError>")]
pub struct FetchMesas;

#[derive(Message)]
#[rtype(result = "Result<MesaDetalhe, ShopError>")]
pub struct CreateMesa {
    pub empresa_id: Option<i64>,
    pub numero: String,
    pub nome: String,
    pub descricao: Option<String>,
    pub numero_pessoas: Option<i32>,
    pub not_numerico: Option<bool>,
}

#[derive(Message)]
#[rtype(result = "Result<MesaDetalhe, ShopError>")]
pub struct FetchMesa {
    pub slug: String,
}

#[derive(Message)]
#[rtype(result = "Result<MesaDetalhe, ShopError>")]
pub struct UpdateMesa {
    pub slug: String,
    pub numero: Option<String>,
    pub nome: Option<String>,
    pub descricao: Option<String>,
    pub numero_pessoas: Option<i32>,
    pub not_numerico: Option<bool>,
}

#[derive(Message)]
#[rtype(result = "Result<(), ShopError>")]
pub struct DeleteMesa {
    pub slug: String,
}

#[derive(Message)]
#[rtype(result = "Result<MesaDetalhe, ShopError>")]
pub struct AddItemToMesa {
    pub mesa_slug: String,
    pub produto_id: i64,
    pub quantidade: i32,
}

#[derive(Message)]
#[rtype(result = "Result<MesaDetalhe, ShopError>")]
pub struct RemoveItemFromMesa {
    pub mesa_slug: String,
    pub item_id: i64,
}

#[derive(Message)]
#[rtype(result = "Result<(), ShopError>")]
pub struct CancelMesaPedido {
    pub slug: String,
}

// ---- pedidos ----

#[derive(Message)]
#[rtype(result = "Result<Vec<PedidoDetalhe>, ShopError>")]
pub struct FetchPedidos;

#[derive(Message)]
#[rtype(result = "Result<PedidoDetalhe, ShopError>")]
pub struct FetchPedido {
    pub slug: String,
}

#[derive(Message)]
#[rtype(result = "Result<(), ShopError>")]
pub struct DeletePedido {
    pub slug: String,
}

#[derive(Message)]
#[rtype(result = "Result<PedidoDetalhe, ShopError>")]
pub struct CreatePedidoFromCarrinho {
    pub carrinho_slug: String,
    pub usuario_id: Option<i64>,
    pub empresa_id: Option<i64>,
    pub metodo_pagamento: Option<String>,
    pub desconto_aplicado: Option<BigDecimal>,
}

#[derive(Message)]
#[rtype(result = "Result<PedidoDetalhe, ShopError>")]
pub struct UpdatePedidoStatus {
    pub slug: String,
    pub status: PedidoStatus,
}

#[derive(Message)]
#[rtype(result = "Result<PedidoDetalhe, ShopError>")]
pub struct ConfirmarRecebimento {
    pub slug: String,
}

// ---- produtos / estoque ----

#[derive(Message)]
#[rtype(result = "Result<Vec<Produto>, ShopError>")]
pub struct FetchProdutos;

#[derive(Message)]
#[rtype(result = "Result<Produto, ShopError>")]
pub struct FetchProduto {
    pub slug: String,
}

#[derive(Message)]
#[rtype(result = "Result<Produto, ShopError>")]
pub struct CreateProduto {
    pub nome: String,
    pub descricao: String,
    pub custo: BigDecimal,
    pub venda: BigDecimal,
    pub codigo: String,
    pub estoque: i32,
    pub empresa_id: i64,
    pub categoria: Option<String>,
    pub imagem: Option<String>,
}

#[derive(Message)]
#[rtype(result = "Result<Vec<Estoque>, ShopError>")]
pub struct FetchEstoques;
