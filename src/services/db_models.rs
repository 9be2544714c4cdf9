use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use diesel::{Queryable, Selectable};
use serde::Serialize;

#[derive(Queryable, Selectable, Debug, Clone, Serialize)]
#[diesel(table_name = crate::schema::empresas)]
pub struct Empresa {
    pub id: i64,
    pub nome: String,
}

#[derive(Queryable, Selectable, Debug, Clone, Serialize)]
#[diesel(table_name = crate::schema::produtos)]
pub struct Produto {
    pub id: i64,
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

impl Produto {
    /// Price a new line item captures: sale price, falling back to cost
    /// while no sale price has been set.
    pub fn preco_vigente(&self) -> BigDecimal {
        if self.venda > BigDecimal::from(0) {
            self.venda.clone()
        } else {
            self.custo.clone()
        }
    }
}

#[derive(Queryable, Selectable, Debug, Clone, Serialize)]
#[diesel(table_name = crate::schema::estoques)]
pub struct Estoque {
    pub id: i64,
    pub empresa_id: i64,
    pub produto_id: i64,
    pub quantidade: i32,
    pub tipo: String,
    pub slug: String,
    pub is_available: bool,
    pub created: NaiveDateTime,
}

#[derive(Queryable, Selectable, Debug, Clone, Serialize)]
#[diesel(table_name = crate::schema::carrinhos)]
pub struct Carrinho {
    pub id: i64,
    pub usuario_id: Option<i64>,
    pub sessao_id: Option<String>,
    pub slug: String,
    pub criado_em: NaiveDateTime,
    pub atualizado_em: NaiveDateTime,
}

#[derive(Queryable, Selectable, Debug, Clone, Serialize)]
#[diesel(table_name = crate::schema::itens_carrinho)]
pub struct ItemCarrinho {
    pub id: i64,
    pub carrinho_id: i64,
    pub produto_id: i64,
    pub quantidade: i32,
    pub preco_unitario: BigDecimal,
    pub empresa_id: Option<String>,
    pub slug: String,
    pub produto_slug: String,
}

impl ItemCarrinho {
    /// Uses the price captured when the item entered the cart, never the
    /// product's current price.
    pub fn subtotal(&self) -> BigDecimal {
        &self.preco_unitario * BigDecimal::from(self.quantidade)
    }
}

#[derive(Queryable, Selectable, Debug, Clone, Serialize)]
#[diesel(table_name = crate::schema::mesas)]
pub struct Mesa {
    pub id: i64,
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

#[derive(Queryable, Selectable, Debug, Clone, Serialize)]
#[diesel(table_name = crate::schema::itens_mesa)]
pub struct ItemMesa {
    pub id: i64,
    pub mesa_id: i64,
    pub produto_id: i64,
    pub quantidade: i32,
    pub preco_unitario: BigDecimal,
    pub produto_nome: String,
    pub produto_slug: String,
    pub slug: String,
}

#[derive(Queryable, Selectable, Debug, Clone, Serialize)]
#[diesel(table_name = crate::schema::pedidos)]
pub struct Pedido {
    pub id: i64,
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

#[derive(Queryable, Selectable, Debug, Clone, Serialize)]
#[diesel(table_name = crate::schema::itens_pedido)]
pub struct ItemPedido {
    pub id: i64,
    pub pedido_id: i64,
    pub produto_id: i64,
    pub quantidade: i32,
    pub preco_unitario: BigDecimal,
    pub total: BigDecimal,
    pub slug: String,
}

/// Order total after discount, clamped so a generous coupon can never
/// produce a negative amount.
pub fn aplicar_desconto(subtotal: BigDecimal, desconto: &BigDecimal) -> BigDecimal {
    let total = subtotal - desconto;
    if total < BigDecimal::from(0) {
        BigDecimal::from(0)
    } else {
        total
    }
}

// ---- response views (the JSON shapes the frontend already consumes) ----

#[derive(Debug, Serialize)]
pub struct ItemCarrinhoView {
    pub id: i64,
    pub produto: i64,
    pub produto_nome: String,
    pub quantidade: i32,
    pub preco_unitario: BigDecimal,
    pub subtotal: BigDecimal,
    pub empresa_id: Option<String>,
    pub slug: String,
    pub produto_slug: String,
}

impl ItemCarrinhoView {
    pub fn new(item: ItemCarrinho, produto_nome: String) -> Self {
        let subtotal = item.subtotal();
        ItemCarrinhoView {
            id: item.id,
            produto: item.produto_id,
            produto_nome,
            quantidade: item.quantidade,
            preco_unitario: item.preco_unitario,
            subtotal,
            empresa_id: item.empresa_id,
            slug: item.slug,
            produto_slug: item.produto_slug,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CarrinhoDetalhe {
    pub id: i64,
    pub usuario: Option<i64>,
    pub sessao_id: Option<String>,
    pub criado_em: NaiveDateTime,
    pub atualizado_em: NaiveDateTime,
    pub itens: Vec<ItemCarrinhoView>,
    pub total: BigDecimal,
    pub slug: String,
}

impl CarrinhoDetalhe {
    pub fn new(carrinho: Carrinho, itens: Vec<(ItemCarrinho, String)>) -> Self {
        let itens: Vec<ItemCarrinhoView> = itens
            .into_iter()
            .map(|(item, nome)| ItemCarrinhoView::new(item, nome))
            .collect();
        let total = itens
            .iter()
            .fold(BigDecimal::from(0), |acc, item| acc + &item.subtotal);

        CarrinhoDetalhe {
            id: carrinho.id,
            usuario: carrinho.usuario_id,
            sessao_id: carrinho.sessao_id,
            criado_em: carrinho.criado_em,
            atualizado_em: carrinho.atualizado_em,
            itens,
            total,
            slug: carrinho.slug,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MesaDetalhe {
    pub id: i64,
    pub empresa: i64,
    pub numero: String,
    pub nome: String,
    pub descricao: Option<String>,
    pub status: String,
    pub pedido: i32,
    pub slug: String,
    pub items: Vec<ItemMesa>,
    pub total: BigDecimal,
    pub created: NaiveDateTime,
    pub updated: NaiveDateTime,
    pub not_numerico: bool,
}

impl MesaDetalhe {
    /// The running table total intentionally prices items at the product's
    /// CURRENT sale price, unlike the cart which keeps add-time prices.
    pub fn new(mesa: Mesa, itens: Vec<(ItemMesa, BigDecimal)>) -> Self {
        let total = itens.iter().fold(BigDecimal::from(0), |acc, (item, venda)| {
            acc + venda * BigDecimal::from(item.quantidade)
        });
        let items = itens.into_iter().map(|(item, _)| item).collect();

        MesaDetalhe {
            id: mesa.id,
            empresa: mesa.empresa_id,
            numero: mesa.numero,
            nome: mesa.nome,
            descricao: mesa.descricao,
            status: mesa.status,
            pedido: mesa.pedido,
            slug: mesa.slug,
            items,
            total,
            created: mesa.created,
            updated: mesa.updated,
            not_numerico: mesa.not_numerico,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ItemPedidoView {
    pub id: i64,
    pub produto: i64,
    pub produto_nome: String,
    pub quantidade: i32,
    pub preco_unitario: BigDecimal,
    pub total: BigDecimal,
    pub slug: String,
}

impl ItemPedidoView {
    pub fn new(item: ItemPedido, produto_nome: String) -> Self {
        ItemPedidoView {
            id: item.id,
            produto: item.produto_id,
            produto_nome,
            quantidade: item.quantidade,
            preco_unitario: item.preco_unitario,
            total: item.total,
            slug: item.slug,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PedidoDetalhe {
    pub id: i64,
    pub usuario: Option<i64>,
    pub status: String,
    pub total: BigDecimal,
    pub metodo_pagamento: Option<String>,
    pub desconto_aplicado: BigDecimal,
    pub slug: String,
    pub empresa_id: i64,
    pub itens: Vec<ItemPedidoView>,
    pub is_available: bool,
    pub origem: String,
    pub created: NaiveDateTime,
    pub updated: NaiveDateTime,
    pub carrinho: Option<i64>,
}

impl PedidoDetalhe {
    pub fn new(pedido: Pedido, itens: Vec<(ItemPedido, String)>) -> Self {
        PedidoDetalhe {
            id: pedido.id,
            usuario: pedido.usuario_id,
            status: pedido.status,
            total: pedido.total,
            metodo_pagamento: pedido.metodo_pagamento,
            desconto_aplicado: pedido.desconto_aplicado,
            slug: pedido.slug,
            empresa_id: pedido.empresa_id,
            itens: itens
                .into_iter()
                .map(|(item, nome)| ItemPedidoView::new(item, nome))
                .collect(),
            is_available: pedido.is_available,
            origem: pedido.origem,
            created: pedido.created,
            updated: pedido.updated,
            carrinho: pedido.carrinho_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chrono::NaiveDate;

    use super::*;

    fn dec(value: &str) -> BigDecimal {
        BigDecimal::from_str(value).unwrap()
    }

    fn ts() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_opt(12, 0, 0).unwrap()
    }

    fn item_carrinho(produto_id: i64, quantidade: i32, preco: &str) -> ItemCarrinho {
        ItemCarrinho {
            id: produto_id,
            carrinho_id: 1,
            produto_id,
            quantidade,
            preco_unitario: dec(preco),
            empresa_id: None,
            slug: format!("item-{produto_id}"),
            produto_slug: format!("produto-{produto_id}"),
        }
    }

    #[test]
    fn subtotal_multiplies_stored_price_by_quantity() {
        assert_eq!(item_carrinho(1, 3, "10.50").subtotal(), dec("31.50"));
        assert_eq!(item_carrinho(1, 1, "0.00").subtotal(), dec("0.00"));
    }

    #[test]
    fn preco_vigente_falls_back_to_cost_when_sale_price_unset() {
        let mut produto = Produto {
            id: 1,
            nome: "Cerveja".into(),
            descricao: String::new(),
            custo: dec("4.00"),
            venda: dec("0.00"),
            codigo: "C1".into(),
            estoque: 10,
            empresa_id: 1,
            categoria: None,
            imagem: None,
            slug: "cerveja".into(),
            is_available: true,
            created: ts(),
            updated: ts(),
        };
        assert_eq!(produto.preco_vigente(), dec("4.00"));

        produto.venda = dec("7.50");
        assert_eq!(produto.preco_vigente(), dec("7.50"));
    }

    #[test]
    fn carrinho_total_uses_add_time_prices() {
        let carrinho = Carrinho {
            id: 1,
            usuario_id: None,
            sessao_id: Some("abc".into()),
            slug: "carrinho-abc".into(),
            criado_em: ts(),
            atualizado_em: ts(),
        };
        let detalhe = CarrinhoDetalhe::new(
            carrinho,
            vec![
                (item_carrinho(1, 2, "10.00"), "Cerveja".into()),
                (item_carrinho(2, 1, "5.25"), "Petisco".into()),
            ],
        );

        assert_eq!(detalhe.total, dec("25.25"));
        assert_eq!(detalhe.itens.len(), 2);
        assert_eq!(detalhe.itens[0].subtotal, dec("20.00"));
    }

    #[test]
    fn mesa_total_uses_live_sale_price_not_stored_price() {
        let mesa = Mesa {
            id: 1,
            empresa_id: 1,
            numero: "12".into(),
            nome: "Mesa 12".into(),
            descricao: None,
            status: "Ocupada".into(),
            pedido: 3,
            valor_pago: dec("0.00"),
            pessoas_pagaram: 0,
            numero_pessoas: 2,
            slug: "mesa-12".into(),
            is_available: true,
            created: ts(),
            updated: ts(),
            not_numerico: false,
        };
        let item = ItemMesa {
            id: 1,
            mesa_id: 1,
            produto_id: 1,
            quantidade: 2,
            preco_unitario: dec("8.00"), // captured at add-time
            produto_nome: "Cerveja".into(),
            produto_slug: "cerveja".into(),
            slug: "cerveja-12".into(),
        };

        // the product was repriced after the item was added
        let detalhe = MesaDetalhe::new(mesa, vec![(item, dec("9.00"))]);
        assert_eq!(detalhe.total, dec("18.00"));
    }

    #[test]
    fn aplicar_desconto_subtracts_and_clamps_at_zero() {
        assert_eq!(aplicar_desconto(dec("30.00"), &dec("5.00")), dec("25.00"));
        assert_eq!(aplicar_desconto(dec("30.00"), &dec("0.00")), dec("30.00"));
        assert_eq!(aplicar_desconto(dec("10.00"), &dec("15.00")), dec("0.00"));
    }
}
