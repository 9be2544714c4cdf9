use actix::Handler;
use bigdecimal::BigDecimal;
use chrono::Utc;
use diesel::prelude::*;

use crate::services::db_models::{aplicar_desconto, ItemCarrinho, Pedido, PedidoDetalhe};
use crate::services::db_utils::PgActor;
use crate::services::insertable::{NewItemPedido, NewPedido};
use crate::services::messages::{
    ConfirmarRecebimento, CreatePedidoFromCarrinho, DeletePedido, FetchPedido, FetchPedidos,
    UpdatePedidoStatus,
};
use crate::services::pg_handling::{
    carrinho_por_slug, detalhe_pedido, empresa_por_id, establish_connection, pedido_por_slug,
};
use crate::services::slug;
use crate::types::{Origem, PedidoStatus, ShopError};

impl Handler<FetchPedidos> for PgActor {
    type Result = Result<Vec<PedidoDetalhe>, ShopError>;

    fn handle(&mut self, _msg: FetchPedidos, _ctx: &mut Self::Context) -> Self::Result {
        use crate::schema::pedidos::dsl::{created, pedidos};

        let mut conn = establish_connection(&self.0)?;

        let todos = pedidos.order(created.desc()).load::<Pedido>(&mut conn)?;
        todos
            .into_iter()
            .map(|pedido| detalhe_pedido(&mut conn, pedido))
            .collect()
    }
}

impl Handler<FetchPedido> for PgActor {
    type Result = Result<PedidoDetalhe, ShopError>;

    fn handle(&mut self, msg: FetchPedido, _ctx: &mut Self::Context) -> Self::Result {
        let mut conn = establish_connection(&self.0)?;

        let pedido = pedido_por_slug(&mut conn, &msg.slug)?;
        detalhe_pedido(&mut conn, pedido)
    }
}

impl Handler<DeletePedido> for PgActor {
    type Result = Result<(), ShopError>;

    fn handle(&mut self, msg: DeletePedido, _ctx: &mut Self::Context) -> Self::Result {
        use crate::schema::itens_pedido::dsl::{itens_pedido, pedido_id};
        use crate::schema::pedidos::dsl::pedidos;

        let mut conn = establish_connection(&self.0)?;

        conn.build_transaction().run(|trx| {
            let pedido = pedido_por_slug(trx, &msg.slug)?;

            diesel::delete(itens_pedido.filter(pedido_id.eq(pedido.id))).execute(trx)?;
            diesel::delete(pedidos.find(pedido.id)).execute(trx)?;

            Ok(())
        })
    }
}

impl Handler<CreatePedidoFromCarrinho> for PgActor {
    type Result = Result<PedidoDetalhe, ShopError>;

    fn handle(&mut self, msg: CreatePedidoFromCarrinho, _ctx: &mut Self::Context) -> Self::Result {
        use crate::schema::itens_carrinho::dsl::{carrinho_id, itens_carrinho};
        use crate::schema::itens_pedido::dsl::itens_pedido;
        use crate::schema::pedidos::dsl::{pedidos, total};

        let mut conn = establish_connection(&self.0)?;

        // the whole conversion is one transaction: a failed item write must
        // not leave an orphaned pedido behind
        conn.build_transaction().run(|trx| {
            let carrinho = carrinho_por_slug(trx, &msg.carrinho_slug)?;
            let empresa = match msg.empresa_id {
                Some(valor) => empresa_por_id(trx, valor)?,
                None => return Err(ShopError::NotFound("Empresa não encontrada".into())),
            };

            let itens = itens_carrinho
                .filter(carrinho_id.eq(carrinho.id))
                .load::<ItemCarrinho>(trx)?;
            if itens.is_empty() {
                return Err(ShopError::InvalidState("Carrinho vazio".into()));
            }

            let desconto = msg
                .desconto_aplicado
                .clone()
                .unwrap_or_else(|| BigDecimal::from(0));
            let agora = Utc::now().naive_utc();

            let pedido = diesel::insert_into(pedidos)
                .values(NewPedido {
                    usuario_id: msg.usuario_id,
                    carrinho_id: Some(carrinho.id),
                    empresa_id: empresa.id,
                    status: PedidoStatus::Pendente.as_str().to_owned(),
                    total: BigDecimal::from(0),
                    metodo_pagamento: msg.metodo_pagamento.clone(),
                    desconto_aplicado: desconto.clone(),
                    origem: Origem::Online.as_str().to_owned(),
                    slug: slug::suffixed("pedido", 5),
                    is_available: true,
                    created: agora,
                    updated: agora,
                })
                .get_result::<Pedido>(trx)?;

            let mut subtotal = BigDecimal::from(0);
            for item in &itens {
                let total_item = item.subtotal();
                diesel::insert_into(itens_pedido)
                    .values(NewItemPedido {
                        pedido_id: pedido.id,
                        produto_id: item.produto_id,
                        quantidade: item.quantidade,
                        preco_unitario: item.preco_unitario.clone(),
                        total: total_item.clone(),
                        slug: slug::suffixed(&format!("item-{}", item.produto_slug), 5),
                    })
                    .execute(trx)?;
                subtotal += total_item;
            }

            let pedido = diesel::update(pedidos.find(pedido.id))
                .set(total.eq(aplicar_desconto(subtotal, &desconto)))
                .get_result::<Pedido>(trx)?;

            // stock stays as reserved at add-time, only the cart empties out
            diesel::delete(itens_carrinho.filter(carrinho_id.eq(carrinho.id))).execute(trx)?;

            log::info!("pedido {} criado a partir do carrinho {}", pedido.slug, carrinho.slug);
            detalhe_pedido(trx, pedido)
        })
    }
}

impl Handler<UpdatePedidoStatus> for PgActor {
    type Result = Result<PedidoDetalhe, ShopError>;

    fn handle(&mut self, msg: UpdatePedidoStatus, _ctx: &mut Self::Context) -> Self::Result {
        use crate::schema::pedidos::dsl::{pedidos, status, updated};

        let mut conn = establish_connection(&self.0)?;

        let pedido = pedido_por_slug(&mut conn, &msg.slug)?;
        let atualizado = diesel::update(pedidos.find(pedido.id))
            .set((status.eq(msg.status.as_str()), updated.eq(Utc::now().naive_utc())))
            .get_result::<Pedido>(&mut conn)?;

        detalhe_pedido(&mut conn, atualizado)
    }
}

impl Handler<ConfirmarRecebimento> for PgActor {
    type Result = Result<PedidoDetalhe, ShopError>;

    fn handle(&mut self, msg: ConfirmarRecebimento, _ctx: &mut Self::Context) -> Self::Result {
        use crate::schema::pedidos::dsl::{pedidos, status, updated};

        let mut conn = establish_connection(&self.0)?;

        let pedido = pedido_por_slug(&mut conn, &msg.slug)?;
        if PedidoStatus::parse(&pedido.status) != Some(PedidoStatus::EmAndamento) {
            return Err(ShopError::InvalidState("Pedido não pode ser confirmado".into()));
        }

        let atualizado = diesel::update(pedidos.find(pedido.id))
            .set((
                status.eq(PedidoStatus::Entregue.as_str()),
                updated.eq(Utc::now().naive_utc()),
            ))
            .get_result::<Pedido>(&mut conn)?;

        detalhe_pedido(&mut conn, atualizado)
    }
}
