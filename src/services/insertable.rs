use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use diesel::{AsChangeset, Insertable};

use crate::schema::{carrinhos, estoques, itens_carrinho, itens_mesa, itens_pedido, mesas, pedidos, produtos};

#[derive(Insertable, Clone)]
#[diesel(table_name = produtos)]
pub struct NewProduto {
    pub nome: String,
    pub descricao: String,
    pub custo: BigDecimal,
    pub venda: BigDecimal,
    pub codigo: String,
    pub estoque: i32,
    pub empresa_id: i64,
    pub categoria: Option<String>,
    pub imagem: Option<String>,
    pub slug: String,
    pub is_available: bool,
    pub created: NaiveDateTime,
    pub updated: NaiveDateTime,
}

#[derive(Insertable, Clone)]
#[diesel(table_name = estoques)]
pub struct NewEstoque {
    pub empresa_id: i64,
    pub produto_id: i64,
    pub quantidade: i32,
    pub tipo: String,
    pub slug: String,
    pub is_available: bool,
    pub created: NaiveDateTime,
}

#[derive(Insertable, Clone)]
#[diesel(table_name = carrinhos)]
pub struct NewCarrinho {
    pub usuario_id: Option<i64>,
    pub sessao_id: Option<String>,
    pub slug: String,
    pub criado_em: NaiveDateTime,
    pub atualizado_em: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = carrinhos)]
pub struct CarrinhoChangeset {
    pub usuario_id: Option<i64>,
    pub sessao_id: Option<String>,
    pub atualizado_em: NaiveDateTime,
}

#[derive(Insertable, Clone)]
#[diesel(table_name = itens_carrinho)]
pub struct NewItemCarrinho {
    pub carrinho_id: i64,
    pub produto_id: i64,
    pub quantidade: i32,
    pub preco_unitario: BigDecimal,
    pub empresa_id: Option<String>,
    pub slug: String,
    pub produto_slug: String,
}

#[derive(Insertable, Clone)]
#[diesel(table_name = mesas)]
pub struct NewMesa {
    pub empresa_id: i64,
    pub numero: String,
    pub nome: String,
    pub descricao: Option<String>,
    pub status: String,
    pub pedido: i32,
    pub valor_pago: BigDecimal,
    pub pessoas_pagaram: i32,
    pub numero_pessoas: i32,
    pub slug: String,
    pub is_available: bool,
    pub created: NaiveDateTime,
    pub updated: NaiveDateTime,
    pub not_numerico: bool,
}

#[derive(AsChangeset)]
#[diesel(table_name = mesas)]
pub struct MesaChangeset {
    pub numero: Option<String>,
    pub nome: Option<String>,
    pub descricao: Option<String>,
    pub numero_pessoas: Option<i32>,
    pub not_numerico: Option<bool>,
    pub updated: NaiveDateTime,
}

#[derive(Insertable, Clone)]
#[diesel(table_name = itens_mesa)]
pub struct NewItemMesa {
    pub mesa_id: i64,
    pub produto_id: i64,
    pub quantidade: i32,
    pub preco_unitario: BigDecimal,
    pub produto_nome: String,
    pub produto_slug: String,
    pub slug: String,
}

#[derive(Insertable, Clone)]
#[diesel(table_name = pedidos)]
pub struct NewPedido {
    pub usuario_id: Option<i64>,
    pub carrinho_id: Option<i64>,
    pub empresa_id: i64,
    pub status: String,
    pub total: BigDecimal,
    pub metodo_pagamento: Option<String>,
    pub desconto_aplicado: BigDecimal,
    pub origem: String,
    pub slug: String,
    pub is_available: bool,
    pub created: NaiveDateTime,
    pub updated: NaiveDateTime,
}

#[derive(Insertable, Clone)]
#[diesel(table_name = itens_pedido)]
pub struct NewItemPedido {
    pub pedido_id: i64,
    pub produto_id: i64,
    pub quantidade: i32,
    pub preco_unitario: BigDecimal,
    pub total: BigDecimal,
    pub slug: String,
}
