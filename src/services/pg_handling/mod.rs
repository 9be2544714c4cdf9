use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};

use crate::services::db_models::{
    Carrinho, CarrinhoDetalhe, Empresa, ItemCarrinho, ItemMesa, ItemPedido, Mesa, MesaDetalhe,
    Pedido, PedidoDetalhe, Produto,
};
use crate::types::ShopError;

pub mod carrinho;
pub mod mesa;
pub mod pedido;
pub mod produto;

pub(crate) fn establish_connection(
    pool: &Pool<ConnectionManager<PgConnection>>,
) -> Result<PooledConnection<ConnectionManager<PgConnection>>, ShopError> {
    pool.get().map_err(|_| ShopError::Pool)
}

/// Atomic conditional debit. The predicate keeps the counter non-negative
/// under concurrent requests: two adds racing for the last units serialize
/// on the row lock and the loser sees zero affected rows.
pub(crate) fn reservar_estoque(conn: &mut PgConnection, produto: i64, qtd: i32) -> Result<(), ShopError> {
    use crate::schema::produtos::dsl::{estoque, id, produtos};

    let updated = diesel::update(produtos.filter(id.eq(produto)).filter(estoque.ge(qtd)))
        .set(estoque.eq(estoque - qtd))
        .execute(conn)?;

    if updated == 0 {
        return Err(ShopError::InsufficientStock);
    }
    Ok(())
}

pub(crate) fn devolver_estoque(conn: &mut PgConnection, produto: i64, qtd: i32) -> Result<(), ShopError> {
    use crate::schema::produtos::dsl::{estoque, id, produtos};

    diesel::update(produtos.filter(id.eq(produto)))
        .set(estoque.eq(estoque + qtd))
        .execute(conn)?;
    Ok(())
}

pub(crate) fn carrinho_por_slug(conn: &mut PgConnection, valor: &str) -> Result<Carrinho, ShopError> {
    use crate::schema::carrinhos::dsl::{carrinhos, slug};

    carrinhos
        .filter(slug.eq(valor))
        .first::<Carrinho>(conn)
        .optional()?
        .ok_or_else(|| ShopError::NotFound("Carrinho não encontrado".into()))
}

pub(crate) fn mesa_por_slug(conn: &mut PgConnection, valor: &str) -> Result<Mesa, ShopError> {
    use crate::schema::mesas::dsl::{mesas, slug};

    mesas
        .filter(slug.eq(valor))
        .first::<Mesa>(conn)
        .optional()?
        .ok_or_else(|| ShopError::NotFound("Mesa não encontrada".into()))
}

pub(crate) fn pedido_por_slug(conn: &mut PgConnection, valor: &str) -> Result<Pedido, ShopError> {
    use crate::schema::pedidos::dsl::{pedidos, slug};

    pedidos
        .filter(slug.eq(valor))
        .first::<Pedido>(conn)
        .optional()?
        .ok_or_else(|| ShopError::NotFound("Pedido não encontrado".into()))
}

pub(crate) fn produto_por_id(conn: &mut PgConnection, valor: i64) -> Result<Produto, ShopError> {
    use crate::schema::produtos::dsl::produtos;

    produtos
        .find(valor)
        .first::<Produto>(conn)
        .optional()?
        .ok_or_else(|| ShopError::NotFound("Produto não encontrado".into()))
}

pub(crate) fn empresa_por_id(conn: &mut PgConnection, valor: i64) -> Result<Empresa, ShopError> {
    use crate::schema::empresas::dsl::empresas;

    empresas
        .find(valor)
        .first::<Empresa>(conn)
        .optional()?
        .ok_or_else(|| ShopError::NotFound("Empresa não encontrada".into()))
}

pub(crate) fn detalhe_carrinho(conn: &mut PgConnection, carrinho: Carrinho) -> Result<CarrinhoDetalhe, ShopError> {
    use crate::schema::itens_carrinho::dsl::{carrinho_id, itens_carrinho};
    use crate::schema::produtos::dsl::{nome, produtos};

    let itens = itens_carrinho
        .inner_join(produtos)
        .filter(carrinho_id.eq(carrinho.id))
        .select((ItemCarrinho::as_select(), nome))
        .load::<(ItemCarrinho, String)>(conn)?;

    Ok(CarrinhoDetalhe::new(carrinho, itens))
}

pub(crate) fn detalhe_mesa(conn: &mut PgConnection, mesa: Mesa) -> Result<MesaDetalhe, ShopError> {
    use crate::schema::itens_mesa::dsl::{itens_mesa, mesa_id};
    use crate::schema::produtos::dsl::{produtos, venda};

    // the mesa running total prices items at the current sale price
    let itens = itens_mesa
        .inner_join(produtos)
        .filter(mesa_id.eq(mesa.id))
        .select((ItemMesa::as_select(), venda))
        .load::<(ItemMesa, bigdecimal::BigDecimal)>(conn)?;

    Ok(MesaDetalhe::new(mesa, itens))
}

pub(crate) fn detalhe_pedido(conn: &mut PgConnection, pedido: Pedido) -> Result<PedidoDetalhe, ShopError> {
    use crate::schema::itens_pedido::dsl::{itens_pedido, pedido_id};
    use crate::schema::produtos::dsl::{nome, produtos};

    let itens = itens_pedido
        .inner_join(produtos)
        .filter(pedido_id.eq(pedido.id))
        .select((ItemPedido::as_select(), nome))
        .load::<(ItemPedido, String)>(conn)?;

    Ok(PedidoDetalhe::new(pedido, itens))
}
